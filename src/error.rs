//! Error types for homeboard

use thiserror::Error;

/// Result type alias for homeboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Transport-level failures from the HTTP layer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Failed to connect")]
    Connect,

    #[error("Response exceeded {limit} bytes")]
    TooLarge { limit: usize },

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connect
        } else {
            FetchError::Other(err.to_string())
        }
    }
}

/// Weather lookup errors
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Invalid latitude: must be a finite number between -90 and 90")]
    InvalidLatitude,

    #[error("Invalid longitude: must be a finite number between -180 and 180")]
    InvalidLongitude,

    #[error("Invalid forecast URL")]
    InvalidForecastUrl,

    #[error("Failed to fetch {stage}: {status}")]
    Transport { stage: FetchStage, status: String },

    #[error("No forecast data available")]
    NoData,

    #[error("Invalid weather response: {0}")]
    InvalidResponse(String),
}

/// Which leg of the two-stage weather lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Points,
    Forecast,
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStage::Points => f.write_str("points"),
            FetchStage::Forecast => f.write_str("forecast"),
        }
    }
}

/// Per-source calendar failures. These are logged and never escape the aggregator.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Invalid calendar URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid protocol {0}")]
    UnsupportedScheme(String),

    #[error("Failed to fetch calendar: {0}")]
    Fetch(#[from] FetchError),

    #[error("Calendar server returned {0}")]
    Status(String),

    #[error("Failed to parse calendar: {0}")]
    Parse(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

/// Daily feed failures. These are logged and replaced with a fallback item.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{api} API error: {status}")]
    Status { api: &'static str, status: String },

    #[error("Invalid {api} response: {message}")]
    InvalidResponse {
        api: &'static str,
        message: String,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `homeboard init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Chore completion store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to save chore completions: {0}")]
    SaveError(String),
}
