//! # Relay Configuration
//!
//! The relay is configured once at startup from the process environment and
//! the resulting [`RelayConfig`] is injected into the application state.
//! Handlers never read environment variables themselves.

use std::env;

use secrecy::SecretString;
use thiserror::Error;
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use tracing::{error, info};

use crate::utils::constant::*;
use crate::utils::secret::get_secret;

const OFFSET_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// Errors raised while validating the relay configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing bot token (set `TELEGRAM_BOT_TOKEN` or `TELEGRAM_BOT_TOKEN_FILE`)")]
    MissingBotToken,

    #[error("missing destination chat id (set `TELEGRAM_CHAT_ID` or `TELEGRAM_CHAT_ID_FILE`)")]
    MissingChatId,
}

/// Validated configuration for relaying submissions.
#[derive(Debug)]
pub struct RelayConfig {
    /// Bot credential, only exposed when building request URLs.
    pub bot_token: SecretString,
    /// Destination chat the summary and attachments are sent to.
    pub chat_id: String,
    /// Base URL of the Bot API, without trailing slash.
    pub api_base: String,
    /// Offset used when rendering the submission timestamp.
    pub display_offset: UtcOffset,
}

impl RelayConfig {
    /// Builds a configuration from already-resolved values.
    ///
    /// Blank secrets are treated as missing. The bot token is checked first, so
    /// a request missing both reports [`ConfigError::MissingBotToken`].
    pub fn new(
        bot_token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bot_token = bot_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingBotToken)?;
        let chat_id = chat_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::MissingChatId)?;

        Ok(Self {
            bot_token: SecretString::from(bot_token.trim().to_string()),
            chat_id,
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            display_offset: UtcOffset::UTC,
        })
    }

    /// Overrides the Bot API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the offset used to render timestamps.
    pub fn with_display_offset(mut self, offset: UtcOffset) -> Self {
        self.display_offset = offset;
        self
    }

    /// Loads and validates the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TELEGRAM_BOT_TOKEN` / `TELEGRAM_BOT_TOKEN_FILE` - Required bot credential
    /// - `TELEGRAM_CHAT_ID` / `TELEGRAM_CHAT_ID_FILE` - Required destination chat
    /// - `TELEGRAM_API_BASE` - Optional API base URL
    /// - `DISPLAY_UTC_OFFSET` - Optional `+HH:MM` offset for timestamps
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::new(
            get_secret("TELEGRAM_BOT_TOKEN_FILE", "TELEGRAM_BOT_TOKEN"),
            get_secret("TELEGRAM_CHAT_ID_FILE", "TELEGRAM_CHAT_ID"),
        )?;

        let config = match env::var("TELEGRAM_API_BASE") {
            Ok(base) if !base.trim().is_empty() => config.with_api_base(base.trim()),
            _ => config,
        };

        let config = match env::var("DISPLAY_UTC_OFFSET") {
            Ok(raw) if !raw.trim().is_empty() => match parse_offset(&raw) {
                Some(offset) => config.with_display_offset(offset),
                None => {
                    error!(%raw, "Invalid DISPLAY_UTC_OFFSET env var, using fallback +00:00");
                    config
                }
            },
            _ => config,
        };

        info!(
            chat_id = %config.chat_id,
            api_base = %config.api_base,
            display_offset = %config.display_offset,
            "Relay configuration loaded"
        );
        Ok(config)
    }
}

/// Parses a `+HH:MM` / `-HH:MM` offset.
pub fn parse_offset(raw: &str) -> Option<UtcOffset> {
    UtcOffset::parse(raw.trim(), OFFSET_FORMAT).ok()
}
