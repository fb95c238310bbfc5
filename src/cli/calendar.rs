//! Calendar command implementation

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::models::EventDisplay;
use crate::output::formatters::{format_day, format_event_time, paint};
use crate::output::{format_json, format_table};
use homeboard::calendar::{CalendarAggregator, CalendarEvent};
use homeboard::config::Config;
use homeboard::error::Result;

/// Show the merged agenda for all configured family calendars
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let sources = ctx.config.calendar_sources();
    debug!("Fetching {} calendars", sources.len());

    let events = if sources.is_empty() {
        Vec::new()
    } else {
        let aggregator = CalendarAggregator::new(ctx.fetcher()?, ctx.config.calendar.clone());
        aggregator.fetch_events(sources.iter().copied()).await
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&events)?),
        OutputFormat::Table => {
            let rows: Vec<EventDisplay> = events.iter().map(EventDisplay::from).collect();
            println!("{}", format_table(&rows));
        }
        OutputFormat::Pretty => print_pretty(&ctx.config, &events),
    }

    Ok(())
}

fn print_pretty(config: &Config, events: &[CalendarEvent]) {
    if config.calendar_sources().is_empty() {
        println!("{} No family calendars configured", "○".dimmed());
        println!("  → Add a calendar_url to a family member in the config file");
        return;
    }

    if events.is_empty() {
        println!("No events in the next {} days.", config.calendar.window_days);
        return;
    }

    let mut current_day = String::new();
    for event in events {
        let day = format_day(event.start_date);
        if day != current_day {
            if !current_day.is_empty() {
                println!();
            }
            println!("{}", day.bold());
            current_day = day;
        }

        let color = config.member_color(&event.source).unwrap_or_default();
        let mut line = format!(
            "  {:<11}  {}  {}",
            format_event_time(event.start_date, event.end_date),
            event.summary,
            paint(&format!("[{}]", event.source), color)
        );
        if let Some(location) = &event.location {
            line.push_str(&format!("  {}", location.dimmed()));
        }
        println!("{}", line);
    }
}
