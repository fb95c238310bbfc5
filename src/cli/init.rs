//! Init command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use homeboard::config::Config;
use homeboard::error::{ConfigError, Result};

/// Write a default configuration file
pub fn run(opts: &GlobalOptions, force: bool) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;

    if path.exists() && !force {
        return Err(ConfigError::Invalid(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    Config::default().save_to(path.clone())?;

    println!("{}", "✓ Configuration written".green());
    println!("Config file: {}", path.display().to_string().cyan());
    println!();
    println!("Next steps:");
    println!("  → Set location.latitude / location.longitude for local weather");
    println!("  → Add a calendar_url (ICS feed) to each family member");

    Ok(())
}
