//! # Health Check Handler
//!
//! Simple health check endpoint for monitoring application availability.
//! It never contacts the messaging platform, so it stays green even when
//! the relay is misconfigured.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Health check endpoint that returns 200 OK.
///
/// # Returns
///
/// Always returns `200 OK` status code with an empty body.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
