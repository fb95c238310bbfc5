//! Weather command implementation

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::models::WeatherDisplay;
use crate::output::formatters::{format_bound, format_temperature};
use crate::output::{format_json, format_table};
use homeboard::error::Result;
use homeboard::weather::{WeatherClient, WeatherSnapshot};

/// Show current conditions for the given or configured coordinates
pub async fn run(opts: &GlobalOptions, lat: Option<f64>, long: Option<f64>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let lat = lat.unwrap_or(ctx.config.location.latitude);
    let long = long.unwrap_or(ctx.config.location.longitude);
    debug!("Fetching weather for {},{}", lat, long);

    let client = WeatherClient::new(ctx.fetcher()?, ctx.config.weather.clone());
    let snapshot = client.get_weather(lat, long).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&snapshot)?),
        OutputFormat::Table => println!("{}", format_table(&[WeatherDisplay::from(&snapshot)])),
        OutputFormat::Pretty => print_pretty(&snapshot),
    }

    Ok(())
}

fn print_pretty(snapshot: &WeatherSnapshot) {
    let unit = snapshot.temperature_unit.as_str();

    println!(
        "{}  {}",
        format_temperature(snapshot.temperature, unit).bold(),
        snapshot.short_forecast.cyan()
    );
    println!(
        "High {} | Low {} | {}",
        format_bound(snapshot.high, unit),
        format_bound(snapshot.low, unit),
        snapshot.weather_icon
    );
    if !snapshot.detailed_forecast.is_empty() {
        println!();
        println!("{}", snapshot.detailed_forecast.dimmed());
    }
}
