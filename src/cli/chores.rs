//! Chores command implementation

use chrono::{Local, NaiveDate};
use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{ChoresArgs, CommandContext, OutputFormat};
use crate::models::ChoreDisplay;
use crate::output::formatters::paint;
use crate::output::{format_json, format_table};
use homeboard::chores::{
    ChoreInstance, Frequency, chore_instances, chore_instances_all, default_catalog,
};
use homeboard::error::{Error, Result};

/// List chores for a day
pub fn list(opts: &GlobalOptions, args: &ChoresArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let store = ctx.open_store()?;
    let date = args.date.unwrap_or_else(today);
    let catalog = default_catalog();

    let instances = if args.all {
        chore_instances_all(&catalog, date, store.completions())
    } else {
        chore_instances(&catalog, date, store.completions())
    };
    debug!("{} chores for {}", instances.len(), date);

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&instances)?),
        OutputFormat::Table => {
            let rows: Vec<ChoreDisplay> = instances.iter().map(ChoreDisplay::from).collect();
            println!("{}", format_table(&rows));
        }
        OutputFormat::Pretty => print_pretty(date, &instances),
    }

    Ok(())
}

/// Toggle completion of one chore for the period containing `date`
pub fn done(opts: &GlobalOptions, id: &str, date: Option<NaiveDate>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut store = ctx.open_store()?;
    let date = date.unwrap_or_else(today);

    let catalog = default_catalog();
    let chore = catalog
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| Error::Other(format!("Unknown chore '{}'", id)))?;

    let key = chore.completion_key(date);
    let completed = store.toggle(&key);
    store.save()?;
    debug!("Toggled {} -> {}", key, completed);

    match ctx.format {
        OutputFormat::Json => {
            let instance = ChoreInstance {
                chore: chore.clone(),
                key,
                completed,
            };
            println!("{}", format_json(&instance)?);
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            if completed {
                println!("{} {} marked done", "✓".green(), chore.text);
            } else {
                println!("{} {} marked not done", "○".dimmed(), chore.text);
            }
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_pretty(date: NaiveDate, instances: &[ChoreInstance]) {
    println!("{}", date.format("%A, %B %-d").to_string().bold());

    for (frequency, heading) in [
        (Frequency::Daily, "Daily"),
        (Frequency::Weekly, "Weekly"),
        (Frequency::Monthly, "Monthly"),
    ] {
        let group: Vec<&ChoreInstance> = instances
            .iter()
            .filter(|i| i.chore.frequency == frequency)
            .collect();
        if group.is_empty() {
            continue;
        }

        println!();
        println!("{}", heading.bold());
        for instance in group {
            let mark = if instance.completed {
                "✓".green()
            } else {
                "○".dimmed()
            };
            println!(
                "  {} {:<3} {}",
                mark,
                instance.chore.id,
                paint(&instance.chore.text, &instance.chore.color)
            );
        }
    }
}
