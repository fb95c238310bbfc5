//! Display models for CLI output
//!
//! Converts core types into table rows with CLI-friendly column names.

pub mod display;

pub use display::{ChoreDisplay, EventDisplay, FeedDisplay, WeatherDisplay};
