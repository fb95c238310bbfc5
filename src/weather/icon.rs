//! Forecast icon classification

use serde::{Deserialize, Serialize};

/// Canonical weather categories shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
    Unknown,
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WeatherIcon::Clear => "Clear",
            WeatherIcon::PartlyCloudy => "Partly Cloudy",
            WeatherIcon::Cloudy => "Cloudy",
            WeatherIcon::Rain => "Rain",
            WeatherIcon::Snow => "Snow",
            WeatherIcon::Thunderstorm => "Thunderstorm",
            WeatherIcon::Fog => "Fog",
            WeatherIcon::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Token groups checked in priority order; the first hit wins.
const ICON_TOKENS: [(&[&str], WeatherIcon); 7] = [
    (&["skc", "few"], WeatherIcon::Clear),
    (&["sct", "bkn"], WeatherIcon::PartlyCloudy), // scattered, broken
    (&["ovc"], WeatherIcon::Cloudy),
    (&["rain", "shra"], WeatherIcon::Rain),
    (&["snow"], WeatherIcon::Snow),
    (&["tsra"], WeatherIcon::Thunderstorm),
    (&["fog"], WeatherIcon::Fog),
];

/// Classify a provider icon URL such as
/// `https://api.weather.gov/icons/land/day/few?size=medium`.
pub fn classify(icon_url: &str) -> WeatherIcon {
    ICON_TOKENS
        .iter()
        .find(|(tokens, _)| tokens.iter().any(|t| icon_url.contains(t)))
        .map(|(_, icon)| *icon)
        .unwrap_or(WeatherIcon::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.weather.gov/icons/land";

    #[test]
    fn test_classify_each_category() {
        let cases = [
            ("day/skc", WeatherIcon::Clear),
            ("night/few", WeatherIcon::Clear),
            ("day/sct", WeatherIcon::PartlyCloudy),
            ("day/bkn", WeatherIcon::PartlyCloudy),
            ("day/ovc", WeatherIcon::Cloudy),
            ("day/rain", WeatherIcon::Rain),
            ("day/shra", WeatherIcon::Rain),
            ("day/snow", WeatherIcon::Snow),
            ("day/tsra", WeatherIcon::Thunderstorm),
            ("day/fog", WeatherIcon::Fog),
        ];

        for (path, expected) in cases {
            let url = format!("{}/{}?size=medium", BASE, path);
            assert_eq!(classify(&url), expected, "url: {}", url);
        }
    }

    #[test]
    fn test_classify_priority_order() {
        // Both "few" and "ovc" present: Clear is checked first
        let url = format!("{}/day/few/ovc?size=medium", BASE);
        assert_eq!(classify(&url), WeatherIcon::Clear);

        // Thunderstorm icons often carry a rain token too
        let url = format!("{}/day/tsra,40/rain?size=medium", BASE);
        assert_eq!(classify(&url), WeatherIcon::Rain);
    }

    #[test]
    fn test_classify_thunderstorm_alone() {
        let url = format!("{}/night/tsra_hi,20?size=medium", BASE);
        assert_eq!(classify(&url), WeatherIcon::Thunderstorm);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(""), WeatherIcon::Unknown);
        assert_eq!(classify(&format!("{}/day/wind_?size=medium", BASE)), WeatherIcon::Unknown);
        assert_eq!(classify("not a url"), WeatherIcon::Unknown);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(WeatherIcon::PartlyCloudy.to_string(), "Partly Cloudy");
        assert_eq!(WeatherIcon::Unknown.to_string(), "Unknown");
    }
}
