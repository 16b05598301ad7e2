//! # Submission Relay
//!
//! A single-endpoint service that receives an application form and relays it
//! to a Telegram chat: a formatted summary first, then the identification
//! photo and the supporting document when present.
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`models`] - Configuration, request schema, and attachment references
//! - [`services`] - Messaging platform access and the relay sequence
//! - [`utils`] - Utility functions and constants

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::any::Any;
use std::env;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::error::AppError;
use crate::handlers::{health_check, method_not_allowed, submit};
use crate::models::{AppState, ConfigError, RelayConfig};
use crate::services::messenger::{LogMessenger, MessengerService, TelegramMessenger};
use crate::utils::constant::MAX_BODY_BYTES;

/// Creates an Axum router with the default messenger.
///
/// This is a convenience function that calls [`app_with_messenger`] with no
/// custom messenger, causing it to pick one based on the `APP_ENV`
/// environment variable.
#[inline]
pub fn app(config: Result<RelayConfig, ConfigError>) -> Router {
    app_with_messenger(config, None)
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `config` - Relay configuration, or the reason it is unavailable
/// * `messenger` - Optional custom messenger. If None, will auto-detect based on APP_ENV
///
/// # Environment Variables
///
/// - `APP_ENV` - "production" (the default) uses [`TelegramMessenger`],
///   anything else uses [`LogMessenger`] (mock)
///
/// # Returns
///
/// A configured Axum router with all application routes and middleware
pub fn app_with_messenger(
    config: Result<RelayConfig, ConfigError>,
    messenger: Option<Arc<dyn MessengerService>>,
) -> Router {
    let state = Arc::new(AppState::new(config, |config| {
        if let Some(messenger) = messenger {
            return messenger;
        }

        let app_env = env::var("APP_ENV")
            .unwrap_or_else(|_| "production".to_string())
            .to_ascii_lowercase();

        if app_env == "production" {
            info!("Running in production mode with [TelegramMessenger]");
            Arc::new(TelegramMessenger::new(config))
        } else {
            info!("Running in development mode with [LogMessenger (Mock)]");
            Arc::new(LogMessenger)
        }
    }));

    Router::new()
        .route("/health-check", get(health_check))
        .route("/api/submit", post(submit).fallback(method_not_allowed))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(%detail, "Request handler panicked");

    AppError::Internal.into_response()
}
