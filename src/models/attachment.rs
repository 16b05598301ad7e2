//! # Attachment References
//!
//! A submission can carry its files either inline, as a
//! `data:<media-type>;base64,<payload>` URL, or as a plain URL the messaging
//! platform downloads by itself.

use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use regex::Regex;
use thiserror::Error;

/// Pattern every inline reference must match to be decodable
static DATA_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^data:([^;,]+)(?:;[^;,]+)*;base64,(.+)$")
        .expect("Failed to compile data URL regex")
});

/// Reasons an inline attachment cannot be turned into bytes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("inline reference does not match `data:<media-type>;base64,<payload>`")]
    Unparseable,

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Where an attachment's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentRef {
    /// Content embedded in the request as a data URL, kept undecoded.
    Inline(String),
    /// URL of a resource the messaging platform fetches on its own.
    Remote(String),
}

/// Decoded content of an inline attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineData {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl AttachmentRef {
    /// Classifies a raw reference. Blank strings mean no attachment.
    pub fn classify(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if raw.starts_with("data:") {
            Some(Self::Inline(raw.to_string()))
        } else {
            Some(Self::Remote(raw.to_string()))
        }
    }
}

impl InlineData {
    /// Decodes a `data:<media-type>;base64,<payload>` reference.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Unparseable`] when the reference does not
    /// follow the data URL shape, or [`AttachmentError::InvalidBase64`] when the
    /// payload is not valid base64.
    pub fn decode(reference: &str) -> Result<Self, AttachmentError> {
        let captures = DATA_URL_REGEX
            .captures(reference)
            .ok_or(AttachmentError::Unparseable)?;

        let media_type = captures[1].trim().to_ascii_lowercase();
        // Whitespace sneaks in when clients wrap long payloads
        let payload: String = captures[2]
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = BASE64
            .decode(payload.as_bytes())
            .map_err(|e| AttachmentError::InvalidBase64(e.to_string()))?;

        Ok(Self { media_type, bytes })
    }

    /// Whether the declared media type is an image.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// File extension derived from the media subtype, without structured suffix.
    ///
    /// `image/jpeg` gives `jpeg`, `image/svg+xml` gives `svg`. Media types
    /// without a subtype fall back to `bin`.
    pub fn extension(&self) -> &str {
        self.media_type
            .split_once('/')
            .map(|(_, subtype)| subtype.split('+').next().unwrap_or(subtype))
            .filter(|ext| !ext.is_empty())
            .unwrap_or("bin")
    }

    /// Builds a filename such as `id_photo.jpeg`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}
