//! Weather lookup against the api.weather.gov two-stage API
//!
//! A coordinate is first resolved to a grid point (whose response names the
//! forecast document URL), then the forecast document is fetched. Both steps
//! are cached inside [`WeatherClient`].

pub mod cache;
pub mod client;
pub mod icon;

use serde::{Deserialize, Serialize};

pub use cache::BoundedCache;
pub use client::WeatherClient;
pub use icon::{WeatherIcon, classify};

/// Current conditions as shown on the dashboard.
///
/// `high`/`low` come from the current and next forecast periods only, so at
/// night `high` is tomorrow's high rather than today's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub temperature_unit: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<i32>,
    /// Raw icon URL from the provider
    pub icon: String,
    pub weather_icon: WeatherIcon,
}

/// One period of a `/gridpoints/{wfo}/{x},{y}/forecast` document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub name: String,
    pub is_daytime: bool,
    pub temperature: i32,
    #[serde(default)]
    pub temperature_unit: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub short_forecast: String,
    #[serde(default)]
    pub detailed_forecast: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointsProperties {
    pub forecast: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

/// Weather client tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    /// Base URL for the points lookup
    pub api_base: String,
    /// Forecast URLs must be https on this domain or one of its subdomains
    pub trusted_domain: String,
    pub grid_cache_capacity: usize,
    pub forecast_cache_capacity: usize,
    pub forecast_ttl_secs: u64,
    pub timeout_secs: u64,
    pub max_response_bytes: usize,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.weather.gov".to_string(),
            trusted_domain: "weather.gov".to_string(),
            grid_cache_capacity: 100,
            forecast_cache_capacity: 100,
            forecast_ttl_secs: 10 * 60, // 10 min
            timeout_secs: 10,
            max_response_bytes: 1024 * 1024, // 1 MiB
        }
    }
}
