use serde::Serialize;

use super::MediaType;

/// A single entry of the search dropdown, ready to paint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultCard {
    pub id: String,
    pub media_type: MediaType,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub rating: String,
    pub watch_url: String,
}

/// What the search dropdown currently shows
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchView {
    /// No dropdown at all
    Hidden,
    Hint { message: String },
    Loading { message: String },
    Results { cards: Vec<ResultCard> },
    /// Empty-state or failure text
    Message { message: String },
}

impl SearchView {
    pub fn hint(message: impl Into<String>) -> Self {
        SearchView::Hint {
            message: message.into(),
        }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        SearchView::Loading {
            message: message.into(),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        SearchView::Message {
            message: message.into(),
        }
    }
}

/// Everything the watch page renders for a loaded item
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchDetails {
    pub page_title: String,
    pub title: String,
    pub date: String,
    pub rating: String,
    pub overview: String,
    pub embed_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WatchView {
    /// The video frame is cleared in this state
    Error { message: String },
    Ready(WatchDetails),
}

impl WatchView {
    pub fn error(message: impl Into<String>) -> Self {
        WatchView::Error {
            message: message.into(),
        }
    }

    pub fn embed_url(&self) -> Option<&str> {
        match self {
            WatchView::Ready(details) => Some(details.embed_url.as_str()),
            WatchView::Error { .. } => None,
        }
    }
}
