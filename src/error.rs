//! Error type shared by the request handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

/// Everything that can go wrong while answering a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown path, or no record with the requested identifier.
    #[error("Not Found")]
    NotFound,

    /// Only GET requests are served.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The static host could not be reached, answered with an error status,
    /// or served something that is not a JSON array of records.
    #[error("upstream dataset request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Upstream(e) => {
                warn!(error = %e, "Dataset fetch failed");
                (status, "Internal Server Error").into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}
