//! Daily feed display model

use tabled::Tabled;

use super::common::truncate_string;
use homeboard::feed::FeedItem;

const MAX_EXPLANATION: usize = 60;

/// One feed card as a table row
#[derive(Debug, Clone, Tabled)]
pub struct FeedDisplay {
    #[tabled(rename = "FEED")]
    pub kind: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "IMAGE")]
    pub url: String,

    #[tabled(rename = "ABOUT")]
    pub explanation: String,
}

impl From<&FeedItem> for FeedDisplay {
    fn from(item: &FeedItem) -> Self {
        Self {
            kind: item.kind.to_string(),
            title: item.title.clone(),
            url: if item.url.is_empty() {
                "--".to_string()
            } else {
                item.url.clone()
            },
            explanation: truncate_string(&item.explanation, MAX_EXPLANATION),
        }
    }
}
