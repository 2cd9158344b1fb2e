//! `Podium` server: a CSV-backed leaderboard with competition ranking,
//! served over HTTP with axum.

pub mod config;
pub mod network;
pub mod service;
pub mod storage;

pub use config::{LogFormat, ServerArgs};
pub use network::NetworkModule;
pub use service::{LeaderboardService, ServiceError};
