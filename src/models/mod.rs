mod attachment;
mod config;
mod state;
mod submission;

pub use attachment::{AttachmentError, AttachmentRef, InlineData};
pub use config::{ConfigError, RelayConfig, parse_offset};
pub use state::AppState;
pub use submission::{RawTimestamp, Submission, SubmissionRequest};
