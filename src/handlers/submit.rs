//! # Submission Handler
//!
//! This module implements the relay endpoint. A submission is defaulted,
//! summarized, and forwarded to the destination chat together with its
//! attachments. Delivery problems are logged and never reach the caller.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::Method};
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, AppResult, RelayResponse};
use crate::models::{AppState, Submission, SubmissionRequest};

/// Relays a submission to the configured chat.
///
/// POST /api/submit SubmissionRequest
///
/// The body is parsed from raw bytes, so the request's `Content-Type` is not
/// checked. The summary is sent first; the identification photo and the
/// supporting document follow, each on a best-effort basis.
///
/// # Returns
///
/// - `200 OK` - `{ "ok": true }` once every step was attempted, even if some failed
/// - `500 Internal Server Error` - `missing_config` when the relay is not
///   configured (no outbound call is made), `internal_error` when the body
///   cannot be parsed
#[instrument(
    skip_all,
    fields(request_id = %uuid::Uuid::new_v4())
)]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<RelayResponse>> {
    debug!(size = body.len(), "Processing submission");
    let received_at = OffsetDateTime::now_utc();

    // 1. Refuse early when the relay has no credentials
    let relay = state
        .relay
        .as_ref()
        .map_err(|e| AppError::MissingConfig(e.clone()))?;

    // 2. Apply defaults
    let request: SubmissionRequest = serde_json::from_slice(&body)?;
    let submission = Submission::from_request(request, received_at);

    // 3. Relay and log the outcome of every step
    let report = relay.relay(&submission).await;
    if report.is_complete() {
        info!(summary = %report.summary, "Submission relayed");
    } else {
        warn!(
            summary = %report.summary,
            id_photo = ?report.id_photo.as_ref().map(ToString::to_string),
            supporting_document = ?report.supporting_document.as_ref().map(ToString::to_string),
            "Submission relayed with failures"
        );
    }

    Ok(Json(RelayResponse::success()))
}

/// Rejects every method other than POST on the relay endpoint.
#[instrument]
pub async fn method_not_allowed(method: Method) -> AppError {
    warn!("Method not allowed on relay endpoint");
    AppError::MethodNotAllowed
}
