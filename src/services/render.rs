//! Pure mapping from metadata records to view-models.
//!
//! Nothing in here touches the network or the page; the templates and the
//! browser script only paint what these functions return.

use crate::{
    config::Config,
    models::{
        ContentDetail, NavigationState, ResultCard, SearchResult, SearchView, WatchDetails,
        WatchView,
    },
    services::embed::EmbedConfig,
};

pub const HINT_MESSAGE: &str = "Keep typing to search...";
pub const LOADING_MESSAGE: &str = "Searching...";
pub const EMPTY_MESSAGE: &str = "No valid results found";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";
pub const INVALID_PARAMS_MESSAGE: &str = "Invalid content parameters";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load content";

const UNTITLED: &str = "Untitled";
const NOT_AVAILABLE: &str = "N/A";
const NO_DESCRIPTION: &str = "No description available.";

/// Rating with one decimal place, or "N/A"
pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(value) if value.is_finite() => format!("{:.1}", value),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Leading year of an ISO date, or "N/A"
pub fn release_year(date: Option<&str>) -> String {
    date.and_then(|d| d.split('-').next())
        .filter(|year| !year.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Display settings shared by both pages
#[derive(Debug, Clone)]
pub struct Presenter {
    image_base_url: String,
    placeholder_image: String,
    site_name: String,
}

impl Presenter {
    pub fn new(
        image_base_url: impl Into<String>,
        placeholder_image: impl Into<String>,
        site_name: impl Into<String>,
    ) -> Self {
        Self {
            image_base_url: image_base_url.into(),
            placeholder_image: placeholder_image.into(),
            site_name: site_name.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.image_base_url.clone(),
            config.placeholder_image.clone(),
            config.site_name.clone(),
        )
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn placeholder_image(&self) -> &str {
        &self.placeholder_image
    }

    fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path.filter(|p| !p.is_empty()) {
            Some(path) => format!("{}{}", self.image_base_url, path),
            None => self.placeholder_image.clone(),
        }
    }

    /// `None` for items without an id or with a type that cannot be played
    pub fn result_card(&self, item: &SearchResult) -> Option<ResultCard> {
        let id = item.id?;
        let media_type = item.supported_media_type()?;
        let target = NavigationState::new(id.to_string(), media_type);

        Some(ResultCard {
            watch_url: target.watch_url(),
            id: target.id,
            media_type,
            title: item.display_title().unwrap_or(UNTITLED).to_string(),
            poster_url: self.poster_url(item.poster_path.as_deref()),
            year: release_year(item.display_date()),
            rating: format_rating(item.vote_average),
        })
    }

    /// Dropdown contents for a completed search
    pub fn search_view(&self, results: &[SearchResult]) -> SearchView {
        let cards: Vec<ResultCard> = results
            .iter()
            .filter_map(|item| self.result_card(item))
            .collect();

        if cards.is_empty() {
            SearchView::message(EMPTY_MESSAGE)
        } else {
            SearchView::Results { cards }
        }
    }

    pub fn watch_view(
        &self,
        detail: &ContentDetail,
        target: &NavigationState,
        embed: &EmbedConfig,
    ) -> WatchView {
        let title = detail.display_title().unwrap_or(UNTITLED).to_string();
        let overview = detail
            .overview
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        WatchView::Ready(WatchDetails {
            page_title: format!("{} - {}", title, self.site_name),
            title,
            date: detail.display_date().unwrap_or(NOT_AVAILABLE).to_string(),
            rating: format_rating(detail.vote_average),
            overview,
            embed_url: embed.embed_url(target),
        })
    }
}
