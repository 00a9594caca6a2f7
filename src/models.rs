use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One classified ad as it appears on a search-results page.
///
/// Only the title is guaranteed: a card without a title is never turned
/// into a `Listing`. Every other field degrades to `None` when the
/// markup lacks it, so the JSON output carries explicit nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub price: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub time_posted: Option<String>,
    pub scraped_at: NaiveDateTime,
}
