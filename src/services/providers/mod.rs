//! Metadata provider abstraction
//!
//! The controllers only ever talk to this trait, so the TMDB client can be
//! swapped for a fake in tests or for another catalogue later.

use crate::{
    error::AppResult,
    models::{ContentDetail, MediaType, SearchResult},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie/TV metadata sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Multi-type search by free text.
    ///
    /// Returns every decodable item of the first page, unfiltered; callers
    /// decide which media types they can show.
    async fn search_multi(&self, query: &str) -> AppResult<Vec<SearchResult>>;

    /// Fetch the detail record of one movie or TV series
    async fn fetch_detail(&self, media_type: MediaType, id: &str) -> AppResult<ContentDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
