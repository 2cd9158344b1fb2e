//! The leaderboard record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One participant's ranked result.
///
/// `rank` is owned by the ranking engine: it is always recomputed from the
/// durations of the whole table and is never taken from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based competition rank.
    pub rank: u32,
    /// Display name. Not unique.
    pub name: String,
    /// Completion instant, serialized in canonical RFC 3339 UTC form.
    #[serde(with = "crate::timestamp::canonical")]
    pub datetime: DateTime<Utc>,
    /// Ride duration in whole seconds. The sole ranking key.
    pub duration_s: u64,
    /// Optional avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}
