//! Display model implementations for table output

mod chore;
mod common;
mod event;
mod feed;
mod weather;

pub use chore::ChoreDisplay;
pub use event::EventDisplay;
pub use feed::FeedDisplay;
pub use weather::WeatherDisplay;
