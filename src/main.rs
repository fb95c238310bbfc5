//! homeboard CLI - household dashboard in the terminal

use clap::Parser;

mod cli;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{ChoreCommands, Cli, Commands};
use homeboard::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init { force } => cli::init::run(&opts, force),
        Commands::Status => cli::status::run(&opts),
        Commands::Weather { lat, long } => cli::weather::run(&opts, lat, long).await,
        Commands::Calendar => cli::calendar::run(&opts).await,
        Commands::Feed { source } => cli::feed::run(&opts, source).await,
        Commands::Chores(args) => match &args.command {
            Some(ChoreCommands::Done { id, date }) => cli::chores::done(&opts, id, *date),
            None => cli::chores::list(&opts, &args),
        },
    }
}

/// Log to stderr at `warn` by default, `debug` with `--debug`.
/// `RUST_LOG` still takes precedence when set.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}
