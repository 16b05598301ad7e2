//! # Messenger Service
//!
//! This module provides the outbound side of the relay: delivering text,
//! photos, and documents to a chat through the Telegram Bot API. The service
//! trait allows for easy testing and switching to a mock implementation.
//!
//! ## Implementations
//!
//! - [`LogMessenger`] - Development implementation that logs every call
//! - [`TelegramMessenger`] - Production implementation using the Bot API
//!
//! ## Usage
//!
//! The messenger is selected based on the `APP_ENV` environment variable:
//! - **Production** (or unset): Uses `TelegramMessenger`
//! - **Anything else**: Uses `LogMessenger` for console output

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::models::RelayConfig;

/// Errors that can occur while talking to the messaging platform
#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("network request failed: {0}")]
    Transport(String),

    #[error("platform rejected the call ({status}): {description}")]
    Rejected { status: u16, description: String },

    #[error("invalid media type `{0}`")]
    InvalidMediaType(String),
}

/// A file handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFile {
    /// Bytes uploaded as a multipart file part.
    Upload {
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
    },
    /// URL the platform downloads by itself.
    Url(String),
}

/// Trait for message delivery services
///
/// This trait provides a common interface for different messenger
/// implementations, allowing the application to switch between the real
/// Bot API and mock implementations for testing.
#[async_trait]
pub trait MessengerService: Send + Sync {
    /// Sends an HTML-formatted text message with link previews disabled.
    ///
    /// # Errors
    ///
    /// Returns [`MessengerError`] on network failure or when the platform
    /// reports the call as failed.
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), MessengerError>;

    /// Sends a photo, uploaded or by URL, with a caption.
    async fn send_photo(
        &self,
        chat_id: &str,
        photo: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError>;

    /// Sends a generic document, uploaded or by URL, with a caption.
    async fn send_document(
        &self,
        chat_id: &str,
        document: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError>;
}

/// Mock messenger for development
///
/// This implementation logs message details to the console instead of
/// calling the messaging platform.
pub struct LogMessenger;

#[async_trait]
impl MessengerService for LogMessenger {
    #[instrument(skip(self, text), fields(chat_id = %chat_id))]
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), MessengerError> {
        info!("Sending mock message");

        println!("====== MOCK MESSAGE SENT ======");
        println!("Chat: {chat_id}");
        println!("-------------------------------");
        println!("{text}");
        println!("===============================");

        Ok(())
    }

    #[instrument(skip(self, photo), fields(chat_id = %chat_id, caption = %caption))]
    async fn send_photo(
        &self,
        chat_id: &str,
        photo: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError> {
        log_mock_file("photo", &photo);
        Ok(())
    }

    #[instrument(skip(self, document), fields(chat_id = %chat_id, caption = %caption))]
    async fn send_document(
        &self,
        chat_id: &str,
        document: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError> {
        log_mock_file("document", &document);
        Ok(())
    }
}

fn log_mock_file(kind: &'static str, file: &InputFile) {
    match file {
        InputFile::Upload {
            file_name,
            media_type,
            bytes,
        } => info!(
            kind,
            %file_name,
            %media_type,
            size = bytes.len(),
            "Sending mock file upload"
        ),
        InputFile::Url(url) => info!(kind, %url, "Sending mock file by URL"),
    }
}

/// Shape shared by every Bot API reply
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API messenger for production use
///
/// Every call is attempted exactly once, with the HTTP client's default
/// timeouts.
pub struct TelegramMessenger {
    api_base: String,
    bot_token: SecretString,
    http_client: reqwest::Client,
}

impl TelegramMessenger {
    /// Creates a messenger for the bot described by `config`.
    pub fn new(config: &RelayConfig) -> Self {
        info!(api_base = %config.api_base, "Initializing Telegram messenger");

        Self {
            api_base: config.api_base.clone(),
            bot_token: SecretString::from(config.bot_token.expose_secret()),
            http_client: reqwest::Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base,
            self.bot_token.expose_secret()
        )
    }

    /// Sends a prepared request and interprets the Bot API reply.
    async fn dispatch(
        &self,
        method: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<(), MessengerError> {
        debug!(method, "Sending HTTP request to Bot API");

        let res = match request.send().await {
            Ok(res) => res,
            Err(e) => {
                // Strip the URL, it carries the bot token
                let e = e.without_url();
                error!(method, error = %e, "Network request to Bot API failed");
                return Err(MessengerError::Transport(e.to_string()));
            }
        };

        let status = res.status();
        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => {
                let e = e.without_url();
                error!(method, %status, error = %e, "Failed to read Bot API reply");
                return Err(MessengerError::Transport(e.to_string()));
            }
        };

        match serde_json::from_str::<ApiReply>(&body) {
            Ok(reply) if status.is_success() && reply.ok => {
                debug!(method, "Bot API call succeeded");
                Ok(())
            }
            Ok(reply) => {
                let description = reply.description.unwrap_or(body);
                error!(method, %status, %description, "Bot API returned error");
                Err(MessengerError::Rejected {
                    status: status.as_u16(),
                    description,
                })
            }
            // Delivery cannot be confirmed without a readable reply
            Err(e) => {
                error!(
                    method,
                    %status,
                    error = %e,
                    error_body = %body,
                    "Unreadable Bot API reply"
                );
                Err(MessengerError::Rejected {
                    status: status.as_u16(),
                    description: body,
                })
            }
        }
    }

    /// Shared path of `sendPhoto` and `sendDocument`.
    async fn send_file(
        &self,
        method: &'static str,
        field: &'static str,
        chat_id: &str,
        file: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError> {
        let request = self.http_client.post(self.method_url(method));

        let request = match file {
            InputFile::Url(url) => request.json(&json!({
                "chat_id": chat_id,
                field: url,
                "caption": caption,
            })),
            InputFile::Upload {
                file_name,
                media_type,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&media_type)
                    .map_err(|_| {
                        warn!(%media_type, "Media type rejected by multipart encoder");
                        MessengerError::InvalidMediaType(media_type.clone())
                    })?;
                let form = Form::new()
                    .text("chat_id", chat_id.to_string())
                    .text("caption", caption.to_string())
                    .part(field, part);
                request.multipart(form)
            }
        };

        self.dispatch(method, request).await
    }
}

#[async_trait]
impl MessengerService for TelegramMessenger {
    #[instrument(skip(self, text), fields(chat_id = %chat_id, length = text.len()))]
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), MessengerError> {
        let request = self
            .http_client
            .post(self.method_url("sendMessage"))
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }));

        self.dispatch("sendMessage", request).await
    }

    #[instrument(skip(self, photo), fields(chat_id = %chat_id, caption = %caption))]
    async fn send_photo(
        &self,
        chat_id: &str,
        photo: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError> {
        self.send_file("sendPhoto", "photo", chat_id, photo, caption)
            .await
    }

    #[instrument(skip(self, document), fields(chat_id = %chat_id, caption = %caption))]
    async fn send_document(
        &self,
        chat_id: &str,
        document: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError> {
        self.send_file("sendDocument", "document", chat_id, document, caption)
            .await
    }
}
