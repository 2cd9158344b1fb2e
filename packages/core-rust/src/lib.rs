//! `Podium` Core: leaderboard records, competition ranking, and the podium view.
//!
//! Everything here is pure: the ranking engine takes a table and returns a
//! new one, and the podium is a filter over an already loaded table.
//! Persistence and transport live in `podium-server`.

pub mod podium;
pub mod ranking;
pub mod record;
pub mod table;
pub mod timestamp;
pub mod validation;

pub use podium::{podium, PODIUM_MAX_RANK};
pub use ranking::{append_and_rerank, rerank};
pub use record::Record;
pub use table::RecordTable;
pub use timestamp::{format_timestamp, parse_timestamp, TimestampParseError};
pub use validation::{NewRecord, RecordSubmission, ValidationError};
