use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};

use crate::{
    error::AppResult,
    models::{WatchDetails, WatchQuery, WatchView},
};

use super::AppState;

/// Landing page with the search box
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_name: String,
    pub placeholder_image: String,
}

/// Detail page; exactly one of `details` and `error` is set
#[derive(Template)]
#[template(path = "watch.html")]
pub struct WatchTemplate {
    pub site_name: String,
    pub page_title: String,
    pub details: Option<WatchDetails>,
    pub error: Option<String>,
}

impl WatchTemplate {
    pub fn new(site_name: &str, view: WatchView) -> Self {
        match view {
            WatchView::Ready(details) => Self {
                site_name: site_name.to_string(),
                page_title: details.page_title.clone(),
                details: Some(details),
                error: None,
            },
            WatchView::Error { message } => Self {
                site_name: site_name.to_string(),
                page_title: site_name.to_string(),
                details: None,
                error: Some(message),
            },
        }
    }
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = IndexTemplate {
        site_name: state.presenter.site_name().to_string(),
        placeholder_image: state.presenter.placeholder_image().to_string(),
    };
    Ok(Html(page.render()?))
}

/// Server-rendered watch page.
///
/// Invalid parameters and fetch failures still render a page with an error
/// box rather than an HTTP error.
pub async fn watch(
    State(state): State<AppState>,
    Query(query): Query<WatchQuery>,
) -> AppResult<Html<String>> {
    let view = state.watch_controller().load(&query).await;
    let page = WatchTemplate::new(state.presenter.site_name(), view);
    Ok(Html(page.render()?))
}
