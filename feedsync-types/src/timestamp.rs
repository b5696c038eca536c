//! ISO-8601 timestamps.
//!
//! Timestamps travel as RFC 3339 strings. Every parsed or deserialized value
//! is normalized to UTC with millisecond precision, so plain string
//! comparison matches chronological order. Sub-millisecond digits are dropped.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// An ISO-8601 timestamp as exchanged with the remote source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Creates a timestamp for the current instant, UTC with millisecond precision.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Formats a UTC datetime the way [`Timestamp::now`] does.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Parses an RFC 3339 timestamp and normalizes it to UTC milliseconds.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let at = DateTime::parse_from_rfc3339(s).map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))?;
        Ok(Self::from_datetime(at.with_timezone(&Utc)))
    }

    /// Wraps a string without validating or normalizing it.
    ///
    /// Ordering against other timestamps is only meaningful if `s` is
    /// already in the normalized form.
    #[must_use]
    pub fn new_unchecked(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the timestamp text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to a UTC datetime, if the text is valid RFC 3339.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = Error;

    fn try_from(s: String) -> crate::Result<Self> {
        Self::parse(&s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
