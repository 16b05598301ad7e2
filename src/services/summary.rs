//! # Summary Message
//!
//! Renders a [`Submission`] as the HTML text posted to the destination chat.

use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use tracing::warn;

use crate::models::Submission;
use crate::utils::html::escape;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");

/// Composes the summary message for a submission.
///
/// Labels are bold, values are escaped so user input can never break the
/// markup, and the timestamp is shown in `offset`.
pub fn compose_summary(submission: &Submission, offset: UtcOffset) -> String {
    let fields: String = [
        ("Full name", &submission.full_name),
        ("National ID", &submission.national_id),
        ("Birthplace", &submission.birth_place),
        ("Birth date", &submission.birth_date),
        ("Address", &submission.address),
        ("Phone", &submission.phone),
        ("Email", &submission.email),
    ]
    .into_iter()
    .map(|(label, value)| format!("<b>{label}:</b> {}\n", escape(value)))
    .collect();

    format!(
        "<b>📋 New application received</b>\n\n\
         {fields}\n\
         <b>Reason:</b>\n{}\n\n\
         <b>Submitted at:</b> {}\n\
         <b>Status:</b> {}",
        escape(&submission.reason),
        format_timestamp(submission, offset),
        escape(&submission.status),
    )
}

fn format_timestamp(submission: &Submission, offset: UtcOffset) -> String {
    let local = submission.submitted_at.to_offset(offset);
    let rendered = local.format(TIMESTAMP_FORMAT).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to format submission timestamp");
        local.to_string()
    });

    if offset == UtcOffset::UTC {
        format!("{rendered} (UTC)")
    } else {
        let (h, m, _) = offset.as_hms();
        let sign = if offset.is_negative() { '-' } else { '+' };
        format!("{rendered} (UTC{sign}{:02}:{:02})", h.abs(), m.abs())
    }
}
