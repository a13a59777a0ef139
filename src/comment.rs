//! Comment record normalization.
//!
//! Comments reach the site from forms and stored records written over
//! several years, and the author/body fields have gone by three names:
//!
//! | Variant | Author key | Body key |
//! |---------|------------|----------|
//! | canonical | `authorName` | `bodyText` |
//! | first legacy | `author` | `text` |
//! | second legacy | `name` | `comment` |
//!
//! [`normalize`] maps any of them onto the one canonical [`Comment`]. The
//! first pairing whose *both* keys are present wins, checked in the order
//! above; keys are case-sensitive and unrecognized keys are ignored. The two
//! legacy shapes are accepted for reading only and are logged at debug level
//! so remaining writers can be found and migrated.
//!
//! ## Timestamps
//!
//! `timestamp` must be an ISO-8601 date-time. Accepted:
//!
//! - with an offset: `2024-01-05T10:00:00Z`, `2024-01-05T18:00:00+08:00`
//! - without one, read as UTC: `2024-01-05T10:00:00`
//! - minute precision, as browser `datetime-local` inputs submit:
//!   `2024-01-05T10:00`, `2024-01-05T10:00Z`, `2024-01-05T18:00+08:00`
//! - fractional seconds: `2024-01-05T10:00:00.123Z`
//!
//! Every form also accepts a space instead of `T`. A bare date is not a
//! date-time. The raw string is kept verbatim on the record.
//!
//! ## Failures
//!
//! Every failure is local to the record. [`normalize_batch`] collects the
//! rejects alongside the accepted comments instead of stopping, and since
//! normalization is pure, re-running a rejected record yields the same error.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::BuildHasher;
use thiserror::Error;

/// Canonical field names, used in errors and in serialized output.
pub const AUTHOR_NAME: &str = "authorName";
pub const BODY_TEXT: &str = "bodyText";
pub const TIMESTAMP: &str = "timestamp";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommentError {
    #[error("no recognized author/body field pairing")]
    SchemaMismatch,
    /// `value` is the raw text, or the JSON text for a non-string JSON value;
    /// `None` when the key is absent.
    #[error("invalid timestamp: {}", .value.as_deref().unwrap_or("<missing>"))]
    InvalidTimestamp { value: Option<String> },
    #[error("empty field: {field}")]
    EmptyField { field: &'static str },
}

/// Which field-name pairing a raw record used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVariant {
    /// `authorName` / `bodyText`
    Canonical,
    /// `author` / `text`
    AuthorText,
    /// `name` / `comment`
    NameComment,
}

impl SchemaVariant {
    /// Resolution order.
    pub const ALL: [SchemaVariant; 3] = [
        SchemaVariant::Canonical,
        SchemaVariant::AuthorText,
        SchemaVariant::NameComment,
    ];

    /// The `(author, body)` keys of this variant.
    pub fn keys(self) -> (&'static str, &'static str) {
        match self {
            Self::Canonical => (AUTHOR_NAME, BODY_TEXT),
            Self::AuthorText => ("author", "text"),
            Self::NameComment => ("name", "comment"),
        }
    }

    pub fn is_legacy(self) -> bool {
        self != Self::Canonical
    }
}

/// A validated comment in canonical shape.
///
/// Only [`normalize`] builds one, so a `Comment` always has a non-empty
/// author and body and a parseable timestamp. Serializes with the canonical
/// wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    author_name: String,
    body_text: String,
    timestamp: String,
    #[serde(skip)]
    posted_at: DateTime<Utc>,
}

impl Comment {
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    /// The timestamp exactly as it arrived.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The timestamp as an instant, offset-less inputs read as UTC.
    pub fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }
}

/// Offset-less layouts, read as UTC. Seconds and fractions are optional.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Minute-precision layouts with a numeric offset. With seconds, RFC 3339
/// parsing already covers them.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Parse an ISO-8601 date-time, normalizing to UTC.
///
/// Date and time may be separated by `T` or a single space in every form.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(local) = value.strip_suffix(['Z', 'z']) {
        return parse_local(local);
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| parse_local(value))
}

fn parse_local(value: &str) -> Option<DateTime<Utc>> {
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Find the first field pairing whose both keys are present.
pub fn detect_variant<S: BuildHasher>(raw: &HashMap<String, String, S>) -> Option<SchemaVariant> {
    SchemaVariant::ALL.into_iter().find(|variant| {
        let (author, body) = variant.keys();
        raw.contains_key(author) && raw.contains_key(body)
    })
}

fn required<S: BuildHasher>(
    raw: &HashMap<String, String, S>,
    key: &str,
    field: &'static str,
) -> Result<String, CommentError> {
    let value = raw.get(key).map(|v| v.trim()).unwrap_or_default();
    if value.is_empty() {
        return Err(CommentError::EmptyField { field });
    }
    Ok(value.to_string())
}

/// Convert a raw key/value record into a canonical [`Comment`].
///
/// Checks run in a fixed order: field pairing, then timestamp, then
/// non-empty author and body (after trimming, which is also how they are
/// stored).
pub fn normalize<S: BuildHasher>(
    raw: &HashMap<String, String, S>,
) -> Result<Comment, CommentError> {
    let variant = detect_variant(raw).ok_or(CommentError::SchemaMismatch)?;
    if variant.is_legacy() {
        tracing::debug!(?variant, "comment uses legacy field names");
    }

    let timestamp = raw
        .get(TIMESTAMP)
        .ok_or(CommentError::InvalidTimestamp { value: None })?;
    let posted_at = parse_timestamp(timestamp).ok_or_else(|| CommentError::InvalidTimestamp {
        value: Some(timestamp.clone()),
    })?;

    let (author_key, body_key) = variant.keys();
    Ok(Comment {
        author_name: required(raw, author_key, AUTHOR_NAME)?,
        body_text: required(raw, body_key, BODY_TEXT)?,
        timestamp: timestamp.clone(),
        posted_at,
    })
}

/// Normalize an untyped JSON record.
///
/// String-valued members become map entries; members of any other type are
/// treated as absent, except a non-string `timestamp`, which is reported as
/// invalid with its JSON text once the field pairing has matched. Anything
/// but an object is a schema mismatch.
pub fn normalize_json(value: &serde_json::Value) -> Result<Comment, CommentError> {
    let serde_json::Value::Object(fields) = value else {
        return Err(CommentError::SchemaMismatch);
    };
    let raw: HashMap<String, String> = fields
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect();
    if let Some(timestamp) = fields.get(TIMESTAMP).filter(|v| !v.is_string()) {
        detect_variant(&raw).ok_or(CommentError::SchemaMismatch)?;
        return Err(CommentError::InvalidTimestamp {
            value: Some(timestamp.to_string()),
        });
    }
    normalize(&raw)
}

/// A record that failed normalization, by position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub error: CommentError,
}

/// Outcome of normalizing a batch: accepted comments in input order, plus
/// the records that were skipped.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub comments: Vec<Comment>,
    pub rejected: Vec<Rejection>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.comments.len() + self.rejected.len()
    }
}

/// Normalize each record independently. A bad record never stops the batch.
pub fn normalize_batch(records: &[serde_json::Value]) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, record) in records.iter().enumerate() {
        match normalize_json(record) {
            Ok(comment) => report.comments.push(comment),
            Err(error) => {
                tracing::warn!(index, %error, "skipping comment record");
                report.rejected.push(Rejection { index, error });
            }
        }
    }
    report
}
