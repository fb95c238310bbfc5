//! Weather display model

use tabled::Tabled;

use crate::output::formatters::{format_bound, format_temperature};
use homeboard::weather::WeatherSnapshot;

/// Current conditions as a single table row
#[derive(Debug, Clone, Tabled)]
pub struct WeatherDisplay {
    #[tabled(rename = "TEMP")]
    pub temperature: String,

    #[tabled(rename = "CONDITIONS")]
    pub conditions: String,

    #[tabled(rename = "HIGH")]
    pub high: String,

    #[tabled(rename = "LOW")]
    pub low: String,

    #[tabled(rename = "ICON")]
    pub icon: String,
}

impl From<&WeatherSnapshot> for WeatherDisplay {
    fn from(snapshot: &WeatherSnapshot) -> Self {
        let unit = snapshot.temperature_unit.as_str();
        Self {
            temperature: format_temperature(snapshot.temperature, unit),
            conditions: snapshot.short_forecast.clone(),
            high: format_bound(snapshot.high, unit),
            low: format_bound(snapshot.low, unit),
            icon: snapshot.weather_icon.to_string(),
        }
    }
}
