//! # Application Constants
//!
//! This module defines configuration constants used throughout the relay.
//! These constants control defaults, limits, and the fixed texts sent to the
//! messaging platform.

/// Placeholder rendered for every textual submission field that was not provided.
pub const PLACEHOLDER: &str = "-";

/// Status label used when the submission carries none.
pub const DEFAULT_STATUS: &str = "pending";

/// Caption attached to the identification photo.
pub const ID_PHOTO_CAPTION: &str = "Identification photo";

/// Caption attached to the supporting document.
pub const SUPPORTING_DOCUMENT_CAPTION: &str = "Supporting document";

/// Base name of the uploaded identification photo, extension derived from its media type.
pub const ID_PHOTO_FILE_STEM: &str = "id_photo";

/// Base name of the uploaded supporting document, extension derived from its media type.
pub const SUPPORTING_DOCUMENT_FILE_STEM: &str = "supporting_document";

/// Default Telegram Bot API endpoint
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default listen address of the HTTP server
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8090";

/// Maximum accepted request body size
///
/// Inline attachments travel base64-encoded inside the JSON body, so the
/// framework default of 2 MiB is far too small for a photo plus a document.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;
