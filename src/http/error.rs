//! Error responses at the HTTP boundary.
//!
//! Every failure the origin reports is a JSON object with a single
//! `detail` string, paired with the status code of its kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The deliberate failure served by `GET /error`.
    #[error("simulated 500")]
    Simulated,

    /// No route matched the request path.
    #[error("Not Found")]
    NotFound,

    /// Any other fault while building a response.
    #[error("{0}")]
    Internal(String),
}

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Simulated | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn detail(&self) -> String {
        match self {
            // The cause is logged, never sent to the client.
            ApiError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            tracing::error!(error = %cause, "Request failed");
        }

        let body = ErrorBody {
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}
