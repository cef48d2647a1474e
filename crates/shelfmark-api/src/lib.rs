//! # shelfmark-api
//!
//! HTTP API for the shelfmark bookmark manager.
//!
//! [`router`] builds the `/api` routes plus `/health` and `/openapi.json`
//! with request-id, tracing, body-limit, and rate-limit layers. [`app`]
//! adds CORS and, when configured, the static frontend with an
//! `index.html` fallback for client-side routes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod services;
pub mod state;

use std::path::Path;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shelfmark_core::defaults;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub use config::AppConfig;
pub use error::ApiError;
pub use state::AppState;

use handlers::bookmarks;
use middleware::{rate_limit_middleware, MakeRequestUuidV7};

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookmarks",
            get(bookmarks::list_bookmarks).post(bookmarks::create_bookmark),
        )
        .route("/bookmarks/search", get(bookmarks::search_bookmarks))
        .route("/bookmarks/actress", get(bookmarks::search_by_actress))
        .route("/bookmarks/actress-list", get(bookmarks::list_actresses))
        .route("/bookmarks/fetch-info", get(bookmarks::fetch_info))
        .route("/bookmarks/sync-titles", post(bookmarks::sync_titles))
        .route(
            "/bookmarks/:id",
            get(bookmarks::get_bookmark).delete(bookmarks::delete_bookmark),
        )
        .route("/bookmarks/:id/tags", post(bookmarks::add_tags))
        .fallback(api_not_found)
}

/// API router with every layer except CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(handlers::openapi_json))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(RequestBodyLimitLayer::new(defaults::REQUEST_BODY_LIMIT))
        .with_state(state)
}

/// Serve `dir` for unmatched paths, answering unknown files with
/// `index.html` so the frontend's router can take over.
pub fn with_frontend(router: Router, dir: &Path) -> Router {
    let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
    router.fallback_service(spa)
}

/// Full application: [`router`], optional static frontend, and CORS.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut app = router(state);
    if let Some(dir) = &config.static_dir {
        app = with_frontend(app, dir);
    }
    app.layer(middleware::cors_layer(&config.allowed_origins))
}
