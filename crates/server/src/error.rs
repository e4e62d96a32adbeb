// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use vidscale_core::StoreError;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload request without a usable `file` part.
    #[error("Missing file")]
    MissingFile,

    /// Status/download request without an `id` query parameter.
    #[error("Missing id")]
    MissingId,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Record exists but is not in a downloadable state. Kept distinct from
    /// not-found so clients can tell "keep polling" from "bad id".
    #[error("Output not ready: {0}")]
    NotReady(String),

    /// Record claims completion but the output file is absent.
    #[error("Output not found: {0}")]
    OutputMissing(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::MissingFile => {
                tracing::warn!("Upload rejected: missing file");
                (StatusCode::BAD_REQUEST, ErrorResponse::new("Missing file"))
            }
            ApiError::MissingId => {
                tracing::warn!("Request rejected: missing id");
                (StatusCode::BAD_REQUEST, ErrorResponse::new("Missing id"))
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Bad request", msg.clone()),
                )
            }
            ApiError::JobNotFound(id) => {
                tracing::warn!(job_id = %id, "Job not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Job not found", format!("Job ID: {}", id)),
                )
            }
            ApiError::NotReady(id) => {
                tracing::debug!(job_id = %id, "Output not ready");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Output not ready", format!("Job ID: {}", id)),
                )
            }
            ApiError::OutputMissing(id) => {
                tracing::error!(job_id = %id, "Record completed but output file missing");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Output not found", format!("Job ID: {}", id)),
                )
            }
            ApiError::Store(store_err) => match store_err {
                StoreError::NotFound { id } => {
                    tracing::warn!(job_id = %id, "Job not found");
                    (
                        StatusCode::NOT_FOUND,
                        ErrorResponse::with_details("Job not found", format!("Job ID: {}", id)),
                    )
                }
                StoreError::Empty => {
                    tracing::debug!("No job records exist");
                    (StatusCode::NOT_FOUND, ErrorResponse::new("No jobs found"))
                }
                StoreError::Traversal { path } => {
                    tracing::error!(path = %path, "Record contained a traversal path");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new("Storage error"),
                    )
                }
                StoreError::Io { path, source } => {
                    tracing::error!(path = %path.display(), error = %source, "Storage IO error");
                    // Internal errors do not expose paths or causes to clients.
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new("Storage error"),
                    )
                }
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
