use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorBody;

/// Faults the dispatch function does not translate into a designed
/// response. They propagate to the caller as uncaught failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Unrecognised match_date: {0:?}")]
    InvalidMatchDate(String),

    #[error("Failed to encode response: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Database(_) => "database",
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::InvalidMatchDate(_) => "invalid_match_date",
            ApiError::Serialize(_) => "serialize",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: "Internal server error".to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
