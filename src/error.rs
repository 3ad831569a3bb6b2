//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// The model's text response could not be parsed as JSON
    #[error("Model response is not valid JSON: {0}")]
    ModelResponse(String),

    /// An upstream provider (completion, geocode, nearby search) failed
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// A top-level lookup returned no usable results
    ///
    /// This is a handled negative outcome, not a failure: the raw provider
    /// payload is carried so the caller can inspect it.
    #[error("No data for the requested lookup")]
    NoData {
        /// Raw provider payload, passed through for caller inspection
        resp: serde_json::Value,
    },

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // "No Data" carries the provider payload instead of an error string
            AppError::NoData { resp } => {
                let body = Json(json!({
                    "message": "No Data",
                    "resp": resp,
                }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
            other => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(json!({
                    "error": other.to_string(),
                    "status": status.as_u16(),
                }));
                (status, body).into_response()
            }
        }
    }
}
