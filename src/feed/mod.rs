//! Rotating daily feed: NASA's picture of the day and a random dog
//!
//! Both lookups always produce a [`FeedItem`]. When the upstream API fails
//! in any way a fixed fallback item is returned instead.

pub mod client;

use serde::{Deserialize, Serialize};

pub use client::FeedClient;

/// Which feed an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Nasa,
    Dog,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Nasa => write!(f, "nasa"),
            FeedKind::Dog => write!(f, "dog"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }
}

/// One card of the daily feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FeedKind,
    pub title: String,
    /// Image to show; empty for a video without a thumbnail
    pub url: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl FeedItem {
    /// Shown when the picture of the day cannot be fetched
    pub fn nasa_fallback() -> Self {
        Self {
            id: "nasa-fallback".to_string(),
            kind: FeedKind::Nasa,
            title: "Space Exploration".to_string(),
            url: "https://apod.nasa.gov/apod/image/2301/NGC2264_Cone_Fox_1024.jpg".to_string(),
            explanation: "NASA Astronomy Picture of the Day is currently unavailable. \
                Enjoy this classic view of the Cone Nebula."
                .to_string(),
            media_type: Some(MediaType::Image),
            thumbnail_url: None,
        }
    }

    /// Shown when the dog image or fact cannot be fetched
    pub fn dog_fallback() -> Self {
        Self {
            id: "dog-fallback".to_string(),
            kind: FeedKind::Dog,
            title: DOG_TITLE.to_string(),
            url: "https://images.dog.ceo/breeds/retriever-golden/n02099601_10.jpg".to_string(),
            explanation: "Dogs have a sense of time. It's been proven that they know the \
                difference between an hour and five hours. If conditioned to, they can \
                predict future events, such as regular walk times."
                .to_string(),
            media_type: Some(MediaType::Image),
            thumbnail_url: None,
        }
    }
}

pub(crate) const DOG_TITLE: &str = "Dog Fact";

/// Used when the fact API answers without a fact
pub(crate) const DEFAULT_DOG_FACT: &str = "Dogs are amazing companions!";

/// `/planetary/apod` response
#[derive(Debug, Deserialize)]
pub(crate) struct ApodResponse {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl ApodResponse {
    pub(crate) fn into_item(self) -> FeedItem {
        let media_type = self.media_type.as_deref().and_then(MediaType::parse);

        // Videos are shown by their thumbnail, or not at all
        let url = match (media_type, &self.thumbnail_url) {
            (Some(MediaType::Video), Some(thumbnail)) => thumbnail.clone(),
            (Some(MediaType::Video), None) => String::new(),
            _ => self.url,
        };

        FeedItem {
            id: format!("nasa-{}", self.date),
            kind: FeedKind::Nasa,
            title: self.title,
            url,
            explanation: self.explanation,
            media_type,
            thumbnail_url: self.thumbnail_url,
        }
    }
}

/// dog.ceo `/breeds/image/random` response
#[derive(Debug, Deserialize)]
pub(crate) struct DogImageResponse {
    pub message: String,
}

/// dogapi.dog `/api/v2/facts` response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DogFactResponse {
    #[serde(default)]
    pub data: Vec<DogFact>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DogFact {
    #[serde(default)]
    pub attributes: DogFactAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DogFactAttributes {
    #[serde(default)]
    pub body: String,
}

impl DogFactResponse {
    pub(crate) fn fact(&self) -> &str {
        self.data
            .first()
            .map(|f| f.attributes.body.as_str())
            .filter(|body| !body.is_empty())
            .unwrap_or(DEFAULT_DOG_FACT)
    }
}

/// Feed client tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Astronomy Picture of the Day endpoint
    pub nasa_url: String,
    pub nasa_api_key: String,
    pub dog_image_url: String,
    pub dog_fact_url: String,
    pub timeout_secs: u64,
    pub max_bytes: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            nasa_url: "https://api.nasa.gov/planetary/apod".to_string(),
            nasa_api_key: "DEMO_KEY".to_string(),
            dog_image_url: "https://dog.ceo/api/breeds/image/random".to_string(),
            dog_fact_url: "https://dogapi.dog/api/v2/facts".to_string(),
            timeout_secs: 10,
            max_bytes: 5 * 1024 * 1024, // 5 MiB
        }
    }
}
