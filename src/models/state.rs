use std::sync::Arc;

use tracing::{error, info};

use crate::models::{ConfigError, RelayConfig};
use crate::services::messenger::MessengerService;
use crate::services::relay::SubmissionRelay;

/// Application state shared across requests. Immutable after startup.
pub struct AppState {
    /// The relay, or the reason it could not be configured.
    ///
    /// A misconfigured service still starts so that callers receive a
    /// `missing_config` error instead of a refused connection.
    pub relay: Result<SubmissionRelay, ConfigError>,
}

impl AppState {
    /// Creates the application state from a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Result of loading the relay configuration
    /// * `messenger` - Service used to reach the messaging platform
    pub fn new(
        config: Result<RelayConfig, ConfigError>,
        messenger: impl FnOnce(&RelayConfig) -> Arc<dyn MessengerService>,
    ) -> Self {
        let relay = match config {
            Ok(config) => {
                info!(chat_id = %config.chat_id, "Initializing application state");
                Ok(SubmissionRelay::new(&config, messenger(&config)))
            }
            Err(e) => {
                error!(error = %e, "Relay is not configured, submissions will be refused");
                Err(e)
            }
        };

        Self { relay }
    }
}
