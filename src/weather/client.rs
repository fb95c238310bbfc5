//! Weather client implementation

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use url::Url;

use super::cache::BoundedCache;
use super::icon::classify;
use super::{ForecastPeriod, ForecastResponse, PointsResponse, WeatherSettings, WeatherSnapshot};
use crate::clock::{Clock, SystemClock};
use crate::error::{FetchStage, WeatherError};
use crate::http::{FetchRequest, FetchResponse, HttpFetch};

const GEO_JSON: &str = "application/geo+json";

type Result<T> = std::result::Result<T, WeatherError>;

/// Client for current conditions at a coordinate.
///
/// Owns its grid-point and forecast caches; create one per process and share
/// it. The caches are locked only for synchronous reads and writes, never
/// across a request.
pub struct WeatherClient {
    fetcher: Arc<dyn HttpFetch>,
    settings: WeatherSettings,
    grid_points: Mutex<BoundedCache<String>>,
    forecasts: Mutex<BoundedCache<Arc<Vec<ForecastPeriod>>>>,
}

impl WeatherClient {
    /// Create a client using wall-clock time for cache expiry
    pub fn new(fetcher: Arc<dyn HttpFetch>, settings: WeatherSettings) -> Self {
        Self::with_clock(fetcher, settings, Arc::new(SystemClock))
    }

    /// Create a client with an explicit time source
    pub fn with_clock(
        fetcher: Arc<dyn HttpFetch>,
        settings: WeatherSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let grid_points = BoundedCache::new(settings.grid_cache_capacity, None, clock.clone());
        let forecasts = BoundedCache::new(
            settings.forecast_cache_capacity,
            Some(Duration::from_secs(settings.forecast_ttl_secs)),
            clock,
        );

        Self {
            fetcher,
            settings,
            grid_points: Mutex::new(grid_points),
            forecasts: Mutex::new(forecasts),
        }
    }

    /// Get current conditions for a coordinate.
    ///
    /// Coordinates are validated before any request is made. Failures are
    /// logged with a fixed message; the returned error carries the detail.
    pub async fn get_weather(&self, lat: f64, long: f64) -> Result<WeatherSnapshot> {
        let result = self.lookup(lat, long).await;
        if result.is_err() {
            log::error!("Error fetching weather data");
        }
        result
    }

    async fn lookup(&self, lat: f64, long: f64) -> Result<WeatherSnapshot> {
        validate_coordinates(lat, long)?;

        let cache_key = format!("{},{}", lat, long);

        let forecast_url = match self.cached_grid_point(&cache_key) {
            Some(url) => {
                debug!("Cache hit: grid point");
                url
            }
            None => {
                let url = self.fetch_grid_point(lat, long).await?;
                self.store_grid_point(&cache_key, url.clone());
                url
            }
        };

        let forecast_url = validate_forecast_url(&forecast_url, &self.settings.trusted_domain)?;

        let periods = match self.cached_forecast(forecast_url.as_str()) {
            Some(periods) => {
                debug!("Cache hit: forecast");
                periods
            }
            None => {
                let periods = Arc::new(self.fetch_forecast(&cache_key, &forecast_url).await?);
                self.store_forecast(forecast_url.as_str(), periods.clone());
                periods
            }
        };

        build_snapshot(&periods)
    }

    async fn fetch_grid_point(&self, lat: f64, long: f64) -> Result<String> {
        let points_url = format!(
            "{}/points/{},{}",
            self.settings.api_base.trim_end_matches('/'),
            lat,
            long
        );
        let url = Url::parse(&points_url).map_err(|_| WeatherError::Transport {
            stage: FetchStage::Points,
            status: "Invalid request URL".to_string(),
        })?;

        debug!("Fetching grid point");
        let response = self.get(url, FetchStage::Points).await?;

        if !response.is_success() {
            return Err(WeatherError::Transport {
                stage: FetchStage::Points,
                status: response.status_text(),
            });
        }

        let points: PointsResponse = serde_json::from_slice(&response.body).map_err(|e| {
            WeatherError::InvalidResponse(format!("Failed to parse points response: {}", e))
        })?;

        Ok(points.properties.forecast)
    }

    async fn fetch_forecast(&self, cache_key: &str, url: &Url) -> Result<Vec<ForecastPeriod>> {
        debug!("Fetching forecast");
        let response = self.get(url.clone(), FetchStage::Forecast).await?;

        if !response.is_success() {
            // The grid point may now point at a retired forecast office
            if response.status == 404
                && let Ok(mut grid_points) = self.grid_points.lock()
            {
                grid_points.remove(cache_key);
            }
            return Err(WeatherError::Transport {
                stage: FetchStage::Forecast,
                status: response.status_text(),
            });
        }

        let forecast: ForecastResponse = serde_json::from_slice(&response.body).map_err(|e| {
            WeatherError::InvalidResponse(format!("Failed to parse forecast response: {}", e))
        })?;

        Ok(forecast.properties.periods)
    }

    async fn get(&self, url: Url, stage: FetchStage) -> Result<FetchResponse> {
        let request = FetchRequest::new(
            url,
            GEO_JSON,
            Duration::from_secs(self.settings.timeout_secs),
            self.settings.max_response_bytes,
        );

        self.fetcher
            .get(&request)
            .await
            .map_err(|e| WeatherError::Transport {
                stage,
                status: e.to_string(),
            })
    }

    fn cached_grid_point(&self, key: &str) -> Option<String> {
        self.grid_points.lock().ok()?.get(key)
    }

    fn store_grid_point(&self, key: &str, forecast_url: String) {
        if let Ok(mut grid_points) = self.grid_points.lock() {
            grid_points.put(key, forecast_url);
        }
    }

    fn cached_forecast(&self, url: &str) -> Option<Arc<Vec<ForecastPeriod>>> {
        self.forecasts.lock().ok()?.get(url)
    }

    fn store_forecast(&self, url: &str, periods: Arc<Vec<ForecastPeriod>>) {
        if let Ok(mut forecasts) = self.forecasts.lock() {
            forecasts.put(url, periods);
        }
    }
}

fn validate_coordinates(lat: f64, long: f64) -> Result<()> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(WeatherError::InvalidLatitude);
    }
    if !long.is_finite() || !(-180.0..=180.0).contains(&long) {
        return Err(WeatherError::InvalidLongitude);
    }
    Ok(())
}

/// Accept only https URLs on `trusted_domain` or a subdomain of it
fn validate_forecast_url(raw: &str, trusted_domain: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| WeatherError::InvalidForecastUrl)?;

    if url.scheme() != "https" {
        return Err(WeatherError::InvalidForecastUrl);
    }

    let host = url.host_str().ok_or(WeatherError::InvalidForecastUrl)?;
    let trusted = host == trusted_domain
        || host
            .strip_suffix(trusted_domain)
            .is_some_and(|prefix| prefix.ends_with('.'));

    if !trusted {
        return Err(WeatherError::InvalidForecastUrl);
    }

    Ok(url)
}

fn build_snapshot(periods: &[ForecastPeriod]) -> Result<WeatherSnapshot> {
    let current = periods.first().ok_or(WeatherError::NoData)?;
    let next = periods.get(1).map(|p| p.temperature);

    let (high, low) = if current.is_daytime {
        (Some(current.temperature), next)
    } else {
        (next, Some(current.temperature))
    };

    Ok(WeatherSnapshot {
        temperature: current.temperature,
        temperature_unit: current.temperature_unit.clone(),
        short_forecast: current.short_forecast.clone(),
        detailed_forecast: current.detailed_forecast.clone(),
        high,
        low,
        icon: current.icon.clone(),
        weather_icon: classify(&current.icon),
    })
}
