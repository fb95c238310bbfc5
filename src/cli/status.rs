//! Status command implementation

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use homeboard::config::Config;
use homeboard::error::{ConfigError, Error, Result};
use homeboard::store::CompletionStore;

/// Display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Homeboard Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_from(config_path.clone()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();
            print_config(&config);
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!("{} Configuration not found (using defaults)", "✗".red());
            println!("  → Run {} to create one", "homeboard init".cyan());
            println!();
            print_config(&Config::default());
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!();
            return Ok(());
        }
    }

    let ctx = CommandContext::new(opts);
    if let Ok(path) = ctx.and_then(|ctx| ctx.store_path()) {
        let store = CompletionStore::open(&path);
        println!();
        println!(
            "Chore store: {} ({} completed)",
            path.display().to_string().cyan(),
            store.completions().values().filter(|done| **done).count()
        );
    }

    println!();
    Ok(())
}

fn print_config(config: &Config) {
    println!(
        "{} Location: {}, {}",
        "✓".green(),
        config.location.latitude,
        config.location.longitude
    );

    let sources = config.calendar_sources();
    println!(
        "{} Calendars: {} of {} family members",
        if sources.is_empty() {
            "○".dimmed()
        } else {
            "✓".green()
        },
        sources.len(),
        config.family.len()
    );

    for member in &config.family {
        if member.calendar_url.trim().is_empty() {
            println!("  {} {} (no calendar)", "○".dimmed(), member.name);
        } else {
            println!("  {} {}", "✓".green(), member.name);
        }
    }
}
