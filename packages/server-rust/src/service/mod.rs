//! Leaderboard operations.
//!
//! [`LeaderboardService`] is the single entry point the transport layer
//! calls: it validates submissions, runs the ranking engine inside the
//! record store's critical section, and reports failures as
//! [`ServiceError`].

pub mod config;
pub mod error;
pub mod leaderboard;

pub use config::{ServiceConfig, DEFAULT_RECORDS_PATH};
pub use error::ServiceError;
pub use leaderboard::LeaderboardService;
