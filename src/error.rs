//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the relay.
//! It centralizes error logging and HTTP response generation. Only failures
//! that abort the whole request live here; delivery problems are recorded
//! in the relay report instead.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::models::ConfigError;

/// Central application error type that encompasses all request-level failures.
///
/// Every variant maps to a JSON body `{ "ok": false, "error": <code> }`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("relay is not configured: {0}")]
    MissingConfig(#[from] ConfigError),

    #[error("malformed request body")]
    MalformedBody(#[from] serde_json::Error),

    #[error("internal server error")]
    Internal,
}

impl AppError {
    /// Machine-readable code sent to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "method_not_allowed",
            AppError::MissingConfig(_) => "missing_config",
            AppError::MalformedBody(_) | AppError::Internal => "internal_error",
        }
    }
}

/// JSON body of every relay response
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingConfig(e) => {
                error!(error = %e, "Refusing submission, relay is not configured");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::MalformedBody(e) => {
                error!(error = %e, "Failed to process submission body");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(RelayResponse {
            ok: false,
            error: Some(self.code().to_string()),
        });

        let mut response = (status, body).into_response();
        if matches!(self, AppError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
