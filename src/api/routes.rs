use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::{handlers, pages, static_files, ws};
use super::AppState;

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Pages
        .route("/", get(pages::index))
        .route("/watch", get(pages::watch))
        // Search session
        .route("/ws/search", get(ws::search_socket))
        // JSON API
        .route("/api/search", get(handlers::search))
        .route("/api/watch", get(handlers::watch))
        // Browser assets
        .route("/static/app.js", get(static_files::app_js))
        .route("/static/app.css", get(static_files::app_css))
        .route(
            "/static/placeholder-poster.svg",
            get(static_files::placeholder_poster),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
