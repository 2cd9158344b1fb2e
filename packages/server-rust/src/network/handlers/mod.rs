//! HTTP handler definitions for the `Podium` server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports the handler functions used to build the router.

pub mod health;
pub mod records;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use records::{add_record_handler, list_records_handler, podium_handler, root_handler};

use std::sync::Arc;
use std::time::Instant;

use crate::service::LeaderboardService;

use super::{NetworkConfig, ShutdownController};

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// The leaderboard operations.
    pub service: Arc<LeaderboardService>,
    /// Graceful shutdown controller with health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<LeaderboardService>, config: Arc<NetworkConfig>) -> Self {
        Self {
            service,
            shutdown: Arc::new(ShutdownController::new()),
            config,
            start_time: Instant::now(),
        }
    }
}
