//! Canonical timestamp codec for record completion times.
//!
//! Every record carries a UTC instant. Inbound strings are accepted as
//! RFC 3339 (any offset, normalized to UTC) or as one of a few naive layouts
//! that are interpreted as UTC. Outbound strings are always RFC 3339 with a
//! `Z` suffix, which sorts lexicographically in time order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Naive layouts tried after RFC 3339, most specific first.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The input string is not a recognised timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised timestamp {input:?}")]
pub struct TimestampParseError {
    /// The rejected input, verbatim.
    pub input: String,
}

/// Parses a caller- or storage-supplied timestamp into a UTC instant.
///
/// Leading and trailing whitespace is ignored. A bare date resolves to
/// midnight UTC.
///
/// # Errors
///
/// Returns [`TimestampParseError`] if the string matches none of the
/// accepted layouts.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampParseError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampParseError {
            input: input.to_string(),
        })
}

/// Formats an instant in the canonical RFC 3339 UTC form.
///
/// Sub-second precision is emitted only when present.
#[must_use]
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter that writes the canonical form and reads any accepted layout.
pub mod canonical {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes with [`format_timestamp`](super::format_timestamp).
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(instant))
    }

    /// Deserializes with [`parse_timestamp`](super::parse_timestamp).
    ///
    /// # Errors
    ///
    /// Fails if the value is not a string or not a recognised timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
