//! Daily feed client

use std::sync::Arc;
use std::time::Duration;

use futures::future::join;
use log::{debug, error};
use serde::de::DeserializeOwned;
use url::Url;

use super::{
    ApodResponse, DOG_TITLE, DogFactResponse, DogImageResponse, FeedItem, FeedKind, FeedSettings,
    MediaType,
};
use crate::clock::{Clock, SystemClock};
use crate::error::FeedError;
use crate::http::{FetchRequest, HttpFetch};

const JSON: &str = "application/json";

type Result<T> = std::result::Result<T, FeedError>;

/// Fetches daily feed items. Never fails; see [`FeedItem::nasa_fallback`]
/// and [`FeedItem::dog_fallback`].
pub struct FeedClient {
    fetcher: Arc<dyn HttpFetch>,
    settings: FeedSettings,
    clock: Arc<dyn Clock>,
}

impl FeedClient {
    pub fn new(fetcher: Arc<dyn HttpFetch>, settings: FeedSettings) -> Self {
        Self::with_clock(fetcher, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        fetcher: Arc<dyn HttpFetch>,
        settings: FeedSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            settings,
            clock,
        }
    }

    /// Today's Astronomy Picture of the Day
    pub async fn nasa(&self) -> FeedItem {
        match self.fetch_nasa().await {
            Ok(item) => item,
            Err(e) => {
                error!("Error fetching NASA data: {}", e);
                FeedItem::nasa_fallback()
            }
        }
    }

    /// A random dog picture with a dog fact
    pub async fn dog(&self) -> FeedItem {
        match self.fetch_dog().await {
            Ok(item) => item,
            Err(e) => {
                error!("Error fetching Dog data: {}", e);
                FeedItem::dog_fallback()
            }
        }
    }

    async fn fetch_nasa(&self) -> Result<FeedItem> {
        let url = Url::parse_with_params(
            &self.settings.nasa_url,
            [
                ("api_key", self.settings.nasa_api_key.as_str()),
                ("thumbs", "True"),
            ],
        )
        .map_err(|e| FeedError::InvalidUrl(e.to_string()))?;

        debug!("Fetching NASA picture of the day");
        let apod: ApodResponse = self.get_json("NASA", url).await?;
        Ok(apod.into_item())
    }

    async fn fetch_dog(&self) -> Result<FeedItem> {
        let image_url = parse_url(&self.settings.dog_image_url)?;
        let fact_url = parse_url(&self.settings.dog_fact_url)?;

        debug!("Fetching dog image and fact");
        let (image, fact) = join(
            self.get_json::<DogImageResponse>("Dog image", image_url),
            self.get_json::<DogFactResponse>("Dog fact", fact_url),
        )
        .await;
        let (image, fact) = (image?, fact?);

        Ok(FeedItem {
            id: format!("dog-{}", self.clock.now().timestamp_millis()),
            kind: FeedKind::Dog,
            title: DOG_TITLE.to_string(),
            url: image.message,
            explanation: fact.fact().to_string(),
            media_type: Some(MediaType::Image),
            thumbnail_url: None,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, api: &'static str, url: Url) -> Result<T> {
        let request = FetchRequest::new(
            url,
            JSON,
            Duration::from_secs(self.settings.timeout_secs),
            self.settings.max_bytes,
        );

        let response = self.fetcher.get(&request).await?;

        if !response.is_success() {
            return Err(FeedError::Status {
                api,
                status: response.status_text(),
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| FeedError::InvalidResponse {
            api,
            message: e.to_string(),
        })
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| FeedError::InvalidUrl(e.to_string()))
}
