//! HTTP handlers for shelfmark-api.

pub mod bookmarks;

use axum::{response::IntoResponse, Json};
use once_cell::sync::Lazy;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

static OPENAPI_DOC: Lazy<utoipa::openapi::OpenApi> = Lazy::new(ApiDoc::openapi);

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /openapi.json
pub async fn openapi_json() -> impl IntoResponse {
    Json(OPENAPI_DOC.clone())
}
