//! Calendar event display model

use tabled::Tabled;

use super::common::truncate_string;
use crate::output::formatters::{format_day, format_event_time};
use homeboard::calendar::CalendarEvent;

const MAX_SUMMARY: usize = 40;

/// One agenda row
#[derive(Debug, Clone, Tabled)]
pub struct EventDisplay {
    #[tabled(rename = "DAY")]
    pub day: String,

    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "EVENT")]
    pub summary: String,

    #[tabled(rename = "WHO")]
    pub source: String,

    #[tabled(rename = "WHERE")]
    pub location: String,
}

impl From<&CalendarEvent> for EventDisplay {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            day: format_day(event.start_date),
            time: format_event_time(event.start_date, event.end_date),
            summary: truncate_string(&event.summary, MAX_SUMMARY),
            source: event.source.clone(),
            location: event.location.clone().unwrap_or_default(),
        }
    }
}
