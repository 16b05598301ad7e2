use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::warn;

use crate::models::AttachmentRef;
use crate::utils::constant::*;

/// Submission timestamp as sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// Milliseconds since the Unix epoch, with a fractional part
    FractionalMillis(f64),
    /// RFC 3339 date-time
    Text(String),
}

/// Request payload of the relay endpoint. Every field is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionRequest {
    #[serde(deserialize_with = "scalar_text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub national_id: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub birth_place: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub birth_date: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "loose_timestamp")]
    pub submitted_at: Option<RawTimestamp>,
    #[serde(deserialize_with = "scalar_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "string_only")]
    pub id_photo: Option<String>,
    #[serde(deserialize_with = "string_only")]
    pub supporting_document: Option<String>,
}

/// Reads any JSON scalar as text. Arrays, objects and `null` count as missing.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Attachment references are only meaningful as strings.
fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn loose_timestamp<'de, D>(deserializer: D) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(RawTimestamp::Text(text)),
        Value::Number(number) => number
            .as_i64()
            .map(RawTimestamp::Millis)
            .or_else(|| number.as_f64().map(RawTimestamp::FractionalMillis)),
        _ => None,
    })
}

/// A submission with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub full_name: String,
    pub national_id: String,
    pub birth_place: String,
    pub birth_date: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub reason: String,
    pub submitted_at: OffsetDateTime,
    pub status: String,
    pub id_photo: Option<AttachmentRef>,
    pub supporting_document: Option<AttachmentRef>,
}

impl Submission {
    /// Applies the defaulting rules to a raw request.
    ///
    /// Missing or blank text fields become [`PLACEHOLDER`], a missing status
    /// becomes [`DEFAULT_STATUS`], and a missing or unreadable timestamp
    /// becomes `received_at`.
    pub fn from_request(raw: SubmissionRequest, received_at: OffsetDateTime) -> Self {
        Self {
            full_name: text_or_placeholder(raw.full_name),
            national_id: text_or_placeholder(raw.national_id),
            birth_place: text_or_placeholder(raw.birth_place),
            birth_date: text_or_placeholder(raw.birth_date),
            address: text_or_placeholder(raw.address),
            phone: text_or_placeholder(raw.phone),
            email: text_or_placeholder(raw.email),
            reason: text_or_placeholder(raw.reason),
            submitted_at: raw
                .submitted_at
                .map(|ts| resolve_timestamp(ts, received_at))
                .unwrap_or(received_at),
            status: non_blank(raw.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            id_photo: raw.id_photo.as_deref().and_then(AttachmentRef::classify),
            supporting_document: raw
                .supporting_document
                .as_deref()
                .and_then(AttachmentRef::classify),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn text_or_placeholder(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn resolve_timestamp(raw: RawTimestamp, received_at: OffsetDateTime) -> OffsetDateTime {
    let parsed = match &raw {
        RawTimestamp::Millis(ms) => {
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(*ms) * 1_000_000).ok()
        }
        RawTimestamp::FractionalMillis(ms) if ms.is_finite() => {
            OffsetDateTime::from_unix_timestamp_nanos((ms * 1_000_000.0).round() as i128).ok()
        }
        RawTimestamp::FractionalMillis(_) => None,
        RawTimestamp::Text(text) if text.trim().is_empty() => return received_at,
        RawTimestamp::Text(text) => OffsetDateTime::parse(text.trim(), &Rfc3339).ok(),
    };

    // Edge years are refused so shifting to the display offset cannot overflow
    parsed.filter(|dt| (1..9999).contains(&dt.year())).unwrap_or_else(|| {
        warn!(?raw, "Unreadable submission timestamp, using time of receipt");
        received_at
    })
}
