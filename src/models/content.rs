use serde::{Deserialize, Serialize};

use super::MediaType;

// ============================================================================
// TMDB API Types
// ============================================================================

/// One item from `/search/multi`.
///
/// Every field is optional on the wire; people, collections and partially
/// populated entries all come back through the same endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

impl SearchResult {
    /// `None` for people and anything else the embed host cannot play
    pub fn supported_media_type(&self) -> Option<MediaType> {
        self.media_type.as_deref()?.parse().ok()
    }

    pub fn display_title(&self) -> Option<&str> {
        first_present(&self.title, &self.name)
    }

    pub fn display_date(&self) -> Option<&str> {
        first_present(&self.release_date, &self.first_air_date)
    }
}

/// Detail record from `/{movie|tv}/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentDetail {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl ContentDetail {
    pub fn display_title(&self) -> Option<&str> {
        first_present(&self.title, &self.name)
    }

    pub fn display_date(&self) -> Option<&str> {
        first_present(&self.release_date, &self.first_air_date)
    }
}

/// Raw page from `/search/multi`; items are decoded one by one so a single
/// malformed entry does not sink the whole page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

impl SearchPage {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
            .into_iter()
            .filter_map(|value| serde_json::from_value::<SearchResult>(value).ok())
            .collect()
    }
}

/// Empty strings count as absent
fn first_present<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> Option<&'a str> {
    primary
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.as_deref().filter(|s| !s.is_empty()))
}
