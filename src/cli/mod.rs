//! CLI command definitions and handlers

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod args;
pub mod calendar;
pub mod chores;
pub mod context;
pub mod feed;
pub mod init;
pub mod status;
pub mod weather;

pub use args::OutputFormat;
pub use context::CommandContext;

/// homeboard - household dashboard: weather, family calendars and chores
#[derive(Parser, Debug)]
#[command(name = "homeboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "HOMEBOARD_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "HOMEBOARD_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override chore completion file location
    #[arg(long, global = true, env = "HOMEBOARD_STORE", hide_env = true)]
    pub store: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "HOMEBOARD_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Show configuration and calendar sources
    Status,

    /// Show current weather conditions
    Weather {
        /// Latitude (defaults to the configured location)
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude (defaults to the configured location)
        #[arg(long, allow_negative_numbers = true)]
        long: Option<f64>,
    },

    /// Show the family agenda for the coming week
    Calendar,

    /// Show chores due on a day
    Chores(ChoresArgs),

    /// Show today's daily feed items
    Feed {
        /// Only show one feed
        #[arg(value_enum)]
        source: Option<FeedSource>,
    },
}

/// Daily feed selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedSource {
    Nasa,
    Dog,
}

/// Arguments for the chores command
#[derive(Args, Debug)]
pub struct ChoresArgs {
    #[command(subcommand)]
    pub command: Option<ChoreCommands>,

    /// Day to show (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Show every chore, not just those due
    #[arg(long)]
    pub all: bool,
}

/// Chore subcommands
#[derive(Subcommand, Debug)]
pub enum ChoreCommands {
    /// Toggle a chore's completion for the current period
    Done {
        /// Chore ID (e.g. d1, w8, m2)
        id: String,

        /// Day within the period (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}
