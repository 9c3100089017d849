use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::{AppError, AppResult};

pub mod content;
pub mod view;

pub use content::{ContentDetail, SearchResult};
pub use view::{ResultCard, SearchView, WatchDetails, WatchView};

/// Kind of content the metadata API and the embed host both understand
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(AppError::InvalidInput(format!(
                "unsupported media type '{}'",
                other
            ))),
        }
    }
}

/// Raw `?id=&type=` parameters of the watch page, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}

/// The only state carried from the search page to the watch page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub id: String,
    pub media_type: MediaType,
}

impl NavigationState {
    pub fn new(id: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            media_type,
        }
    }

    /// Validates presence of both parameters and membership of the type.
    ///
    /// The id itself is passed through as-is; the metadata API decides whether it exists.
    pub fn from_query(query: &WatchQuery) -> AppResult<Self> {
        let id = query
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::InvalidInput("missing content id".to_string()))?;

        let media_type = query
            .media_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::InvalidInput("missing content type".to_string()))?
            .parse::<MediaType>()?;

        Ok(Self::new(id, media_type))
    }

    /// Relative URL of the watch page for this item
    pub fn watch_url(&self) -> String {
        format!(
            "/watch?id={}&type={}",
            urlencoding::encode(&self.id),
            self.media_type
        )
    }
}
