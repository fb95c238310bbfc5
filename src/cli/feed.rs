//! Feed command implementation

use colored::Colorize;
use futures::future::join;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, FeedSource, OutputFormat};
use crate::models::FeedDisplay;
use crate::output::{format_json, format_table};
use homeboard::error::Result;
use homeboard::feed::{FeedClient, FeedItem};

/// Show the NASA picture of the day and a dog fact, or just one of them
pub async fn run(opts: &GlobalOptions, source: Option<FeedSource>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = FeedClient::new(ctx.fetcher()?, ctx.config.feed.clone());

    let items = match source {
        Some(FeedSource::Nasa) => vec![client.nasa().await],
        Some(FeedSource::Dog) => vec![client.dog().await],
        None => {
            let (nasa, dog) = join(client.nasa(), client.dog()).await;
            vec![nasa, dog]
        }
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&items)?),
        OutputFormat::Table => {
            let rows: Vec<FeedDisplay> = items.iter().map(FeedDisplay::from).collect();
            println!("{}", format_table(&rows));
        }
        OutputFormat::Pretty => print_pretty(&items),
    }

    Ok(())
}

fn print_pretty(items: &[FeedItem]) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", item.title.bold());
        if !item.url.is_empty() {
            println!("{}", item.url.cyan());
        }
        println!("{}", item.explanation.dimmed());
    }
}
