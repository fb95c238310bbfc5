//! Family calendar aggregation
//!
//! Each configured ICS feed is fetched concurrently, parsed, and clipped to a
//! rolling window starting now. A failing feed contributes nothing; the rest
//! are merged and sorted by start time.

pub mod ics;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::clock::{Clock, SystemClock};
use crate::error::CalendarError;
use crate::http::{FetchRequest, HttpFetch};

const TEXT_CALENDAR: &str = "text/calendar";

/// An event inside the agenda window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Display name of the calendar this event came from
    pub source: String,
}

/// Calendar fetch tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub timeout_secs: u64,
    pub max_bytes: usize,
    /// Length of the agenda window starting now
    pub window_days: i64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_bytes: 5 * 1024 * 1024, // 5 MiB
            window_days: 7,
        }
    }
}

/// Fetches and merges ICS feeds
pub struct CalendarAggregator {
    fetcher: Arc<dyn HttpFetch>,
    settings: CalendarSettings,
    clock: Arc<dyn Clock>,
}

impl CalendarAggregator {
    pub fn new(fetcher: Arc<dyn HttpFetch>, settings: CalendarSettings) -> Self {
        Self::with_clock(fetcher, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        fetcher: Arc<dyn HttpFetch>,
        settings: CalendarSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            settings,
            clock,
        }
    }

    /// Fetch all `(name, url)` sources and return their upcoming events
    /// sorted by start time. Never fails; broken sources are logged and
    /// contribute no events.
    pub async fn fetch_events<'a, I>(&self, sources: I) -> Vec<CalendarEvent>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let now = self.clock.now();
        let Some(window_end) = window_end(now, self.settings.window_days) else {
            warn!(
                "Calendar window of {} days is out of range",
                self.settings.window_days
            );
            return Vec::new();
        };

        let fetches = sources.into_iter().map(|(name, url)| async move {
            match self.fetch_source(name, url, now, window_end).await {
                Ok(events) => {
                    debug!("Calendar {}: {} upcoming events", name, events.len());
                    events
                }
                Err(e @ (CalendarError::InvalidUrl(_) | CalendarError::UnsupportedScheme(_))) => {
                    warn!("Skipping calendar for {}: {}", name, e);
                    Vec::new()
                }
                Err(e) => {
                    warn!("Failed to fetch calendar: {}: {}", name, e);
                    Vec::new()
                }
            }
        });

        let mut events: Vec<CalendarEvent> = join_all(fetches).await.into_iter().flatten().collect();

        // Stable, so same-start events keep source order
        events.sort_by_key(|e| e.start_date);
        events
    }

    async fn fetch_source(
        &self,
        name: &str,
        raw_url: &str,
        now: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let url = validate_calendar_url(raw_url)?;

        let request = FetchRequest::new(
            url,
            TEXT_CALENDAR,
            Duration::from_secs(self.settings.timeout_secs),
            self.settings.max_bytes,
        );
        let response = self.fetcher.get(&request).await?;

        if !response.is_success() {
            return Err(CalendarError::Status(response.status_text()));
        }

        let body = String::from_utf8_lossy(&response.body);
        let events = ics::parse_events(&body, name)?;

        Ok(events
            .into_iter()
            .filter(|e| e.end_date > now && e.start_date < window_end)
            .collect())
    }
}

/// End of a window of `days` starting at `now`, if that is representable
fn window_end(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    if days < 1 {
        return None;
    }
    chrono::Duration::try_days(days).and_then(|window| now.checked_add_signed(window))
}

/// Only http and https feeds are fetched
fn validate_calendar_url(raw: &str) -> Result<Url, CalendarError> {
    let url = Url::parse(raw).map_err(|e| CalendarError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CalendarError::UnsupportedScheme(format!("{}:", other))),
    }
}
