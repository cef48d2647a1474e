//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors a handler can return; rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Storage or other unexpected failure (500).
    #[error(transparent)]
    Internal(shelfmark_core::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl From<shelfmark_core::Error> for ApiError {
    fn from(err: shelfmark_core::Error) -> Self {
        match err {
            shelfmark_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            shelfmark_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                tracing::error!(subsystem = "api", error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status() {
        let cases = [
            (
                shelfmark_core::Error::InvalidInput("url is required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                shelfmark_core::Error::NotFound("bookmark".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                shelfmark_core::Error::Config("bad".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                shelfmark_core::Error::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
