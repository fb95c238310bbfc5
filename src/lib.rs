//! homeboard - household dashboard core
//!
//! Chore scheduling, family calendar aggregation, weather lookup and the
//! daily feed. The
//! `homeboard` binary is a thin CLI over these modules.

pub mod calendar;
pub mod chores;
pub mod clock;
pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod store;
pub mod weather;

pub use calendar::{CalendarAggregator, CalendarEvent, CalendarSettings};
pub use chores::{ChoreDefinition, ChoreInstance, Frequency, chores_for_date, default_catalog};
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{FeedClient, FeedItem, FeedKind, FeedSettings};
pub use store::CompletionStore;
pub use weather::{WeatherClient, WeatherIcon, WeatherSettings, WeatherSnapshot, classify};
