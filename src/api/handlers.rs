use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{SearchView, WatchQuery, WatchView},
    services::{
        render::HINT_MESSAGE,
        search::{plan_query, QueryPlan},
    },
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// One-shot search without debouncing, for clients that do their own
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchView>> {
    let query = match plan_query(&params.q, state.search_settings.min_chars) {
        QueryPlan::Clear => return Ok(Json(SearchView::Hidden)),
        QueryPlan::Hint => return Ok(Json(SearchView::hint(HINT_MESSAGE))),
        QueryPlan::Search(query) => query,
    };

    tracing::info!(request_id = %request_id, query = %query, "Processing search request");

    let results = state.provider.search_multi(&query).await?;
    Ok(Json(state.presenter.search_view(&results)))
}

/// Watch page view-model as JSON
pub async fn watch(
    State(state): State<AppState>,
    Query(query): Query<WatchQuery>,
) -> Json<WatchView> {
    Json(state.watch_controller().load(&query).await)
}
