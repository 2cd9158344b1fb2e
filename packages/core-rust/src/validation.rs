//! Boundary validation for record submissions.
//!
//! A [`RecordSubmission`] is the untrusted shape a caller sends. Validation
//! turns it into a [`NewRecord`], the only input the ranking engine accepts,
//! so malformed data never reaches a mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Record;
use crate::timestamp::{parse_timestamp, TimestampParseError};

/// Raw record submission as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSubmission {
    pub name: String,
    /// Timestamp string in any layout accepted by
    /// [`parse_timestamp`](crate::timestamp::parse_timestamp).
    pub datetime: String,
    /// Signed so that negative input is reported rather than rejected by
    /// the decoder.
    pub duration_s: i64,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A submission failed a domain constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("invalid datetime: {0}")]
    InvalidTimestamp(#[from] TimestampParseError),
    #[error("duration_s must be non-negative, got {0}")]
    NegativeDuration(i64),
}

/// A validated, not yet ranked record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    name: String,
    datetime: DateTime<Utc>,
    duration_s: u64,
    avatar_url: Option<String>,
}

impl NewRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    #[must_use]
    pub fn duration_s(&self) -> u64 {
        self.duration_s
    }

    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Attaches a rank. Only the ranking engine assigns ranks.
    pub(crate) fn into_record(self, rank: u32) -> Record {
        Record {
            rank,
            name: self.name,
            datetime: self.datetime,
            duration_s: self.duration_s,
            avatar_url: self.avatar_url,
        }
    }
}

impl RecordSubmission {
    /// Checks domain constraints and produces a [`NewRecord`].
    ///
    /// The name is trimmed; a blank avatar URL is treated as absent.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] if the name is blank.
    /// - [`ValidationError::InvalidTimestamp`] if `datetime` does not parse.
    /// - [`ValidationError::NegativeDuration`] if `duration_s < 0`.
    pub fn validate(self) -> Result<NewRecord, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let datetime = parse_timestamp(&self.datetime)?;

        let duration_s = u64::try_from(self.duration_s)
            .map_err(|_| ValidationError::NegativeDuration(self.duration_s))?;

        let avatar_url = self
            .avatar_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(NewRecord {
            name: name.to_string(),
            datetime,
            duration_s,
            avatar_url,
        })
    }
}
