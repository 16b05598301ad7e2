//! # Submission Relay
//!
//! Forwards one [`Submission`] to the destination chat: the summary message
//! first, then the identification photo and the supporting document. Every
//! step is attempted once, in order, and a failing step never stops the
//! following ones. Outcomes are collected in a [`RelayReport`].

use std::fmt;
use std::sync::Arc;

use time::UtcOffset;
use tracing::{debug, error, info, instrument, warn};

use crate::models::{AttachmentRef, InlineData, RelayConfig, Submission};
use crate::services::messenger::{InputFile, MessengerService};
use crate::services::summary::compose_summary;
use crate::utils::constant::*;

/// Result of a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The platform accepted the call.
    Delivered,
    /// Nothing was sent because the inline reference could not be decoded.
    Skipped(String),
    /// The call was made and failed.
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => f.write_str("delivered"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Outcome of every step of one relay run. `None` means no attachment was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReport {
    pub summary: DeliveryOutcome,
    pub id_photo: Option<DeliveryOutcome>,
    pub supporting_document: Option<DeliveryOutcome>,
}

impl RelayReport {
    /// Whether every attempted step was delivered.
    pub fn is_complete(&self) -> bool {
        self.summary.is_delivered()
            && [&self.id_photo, &self.supporting_document]
                .into_iter()
                .flatten()
                .all(DeliveryOutcome::is_delivered)
    }
}

/// Which attachment slot is being forwarded. The two differ in caption,
/// filename, and how they pick the platform operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    IdPhoto,
    SupportingDocument,
}

impl Slot {
    fn caption(self) -> &'static str {
        match self {
            Slot::IdPhoto => ID_PHOTO_CAPTION,
            Slot::SupportingDocument => SUPPORTING_DOCUMENT_CAPTION,
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            Slot::IdPhoto => ID_PHOTO_FILE_STEM,
            Slot::SupportingDocument => SUPPORTING_DOCUMENT_FILE_STEM,
        }
    }
}

/// Relays submissions to one configured chat.
pub struct SubmissionRelay {
    chat_id: String,
    display_offset: UtcOffset,
    messenger: Arc<dyn MessengerService>,
}

impl SubmissionRelay {
    pub fn new(config: &RelayConfig, messenger: Arc<dyn MessengerService>) -> Self {
        Self {
            chat_id: config.chat_id.clone(),
            display_offset: config.display_offset,
            messenger,
        }
    }

    /// Runs the whole relay sequence for `submission`.
    ///
    /// Never fails: each step's error is logged and recorded in the report.
    #[instrument(skip_all, fields(chat_id = %self.chat_id))]
    pub async fn relay(&self, submission: &Submission) -> RelayReport {
        let summary = self.send_summary(submission).await;

        let id_photo = match &submission.id_photo {
            Some(reference) => Some(self.send_attachment(Slot::IdPhoto, reference).await),
            None => None,
        };

        let supporting_document = match &submission.supporting_document {
            Some(reference) => Some(
                self.send_attachment(Slot::SupportingDocument, reference)
                    .await,
            ),
            None => None,
        };

        RelayReport {
            summary,
            id_photo,
            supporting_document,
        }
    }

    async fn send_summary(&self, submission: &Submission) -> DeliveryOutcome {
        let text = compose_summary(submission, self.display_offset);
        debug!(length = text.len(), "Sending summary message");

        match self.messenger.send_message(&self.chat_id, &text).await {
            Ok(()) => {
                info!("Summary message delivered");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                // Attachments are still attempted
                error!(error = %e, "Failed to deliver summary message");
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }

    #[instrument(skip(self, reference))]
    async fn send_attachment(&self, slot: Slot, reference: &AttachmentRef) -> DeliveryOutcome {
        let caption = slot.caption();

        let result = match reference {
            AttachmentRef::Remote(url) => {
                debug!(%url, "Forwarding attachment by URL");
                let file = InputFile::Url(url.clone());
                match slot {
                    Slot::IdPhoto => self.messenger.send_photo(&self.chat_id, file, caption).await,
                    Slot::SupportingDocument => {
                        self.messenger
                            .send_document(&self.chat_id, file, caption)
                            .await
                    }
                }
            }
            AttachmentRef::Inline(data_url) => {
                let data = match InlineData::decode(data_url) {
                    Ok(data) => data,
                    Err(e) => {
                        warn!(error = %e, "Skipping attachment with unreadable inline data");
                        return DeliveryOutcome::Skipped(e.to_string());
                    }
                };

                let as_photo = match slot {
                    Slot::IdPhoto => true,
                    Slot::SupportingDocument => data.is_image(),
                };
                debug!(
                    media_type = %data.media_type,
                    size = data.bytes.len(),
                    as_photo,
                    "Uploading inline attachment"
                );

                let file = InputFile::Upload {
                    file_name: data.file_name(slot.file_stem()),
                    media_type: data.media_type,
                    bytes: data.bytes,
                };
                if as_photo {
                    self.messenger.send_photo(&self.chat_id, file, caption).await
                } else {
                    self.messenger
                        .send_document(&self.chat_id, file, caption)
                        .await
                }
            }
        };

        match result {
            Ok(()) => {
                info!("Attachment delivered");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                error!(error = %e, "Failed to deliver attachment");
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }
}
