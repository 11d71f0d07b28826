//! Deadline representation.
//!
//! Callers may hand in either a native point in time or a textual date.
//! The stored value is never rewritten: resolution into a UTC instant is
//! done on demand for ranking, so the caller gets back exactly what it
//! supplied.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Naive date-time layouts accepted after RFC 3339, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A task deadline as supplied by the caller.
///
/// # Serialization
/// Untagged. A JSON string always deserializes to [`Deadline::Text`] so the
/// caller's text round-trips unchanged; [`Deadline::At`] serializes as an
/// RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deadline {
    /// Textual date, parsed lazily.
    Text(String),
    /// Native point in time.
    At(DateTime<Utc>),
}

impl Deadline {
    /// Creates a textual deadline.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Resolves the deadline into a UTC instant.
    ///
    /// Accepted text forms, tried in order:
    /// 1. RFC 3339 (`2024-05-01T12:00:00Z`, `2024-05-01T12:00:00+09:00`)
    /// 2. Naive date-time (`2024-05-01T12:00:00`, `2024-05-01 12:00`), as UTC
    /// 3. Plain date (`2024-05-01`), midnight UTC
    ///
    /// Returns `None` when the text matches none of them.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(at) => Some(*at),
            Self::Text(text) => parse_deadline_text(text),
        }
    }
}

impl From<DateTime<Utc>> for Deadline {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

impl From<&str> for Deadline {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Deadline {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::At(at) => write!(f, "{}", at.to_rfc3339()),
        }
    }
}

fn parse_deadline_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
