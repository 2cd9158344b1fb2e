//! Command-line and environment configuration for the `podium-server` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::network::{NetworkConfig, DEFAULT_PORT};
use crate::service::{ServiceConfig, DEFAULT_RECORDS_PATH};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, one event per line.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Podium leaderboard server.
#[derive(Debug, Parser)]
#[command(name = "podium-server", version, about)]
pub struct ServerArgs {
    /// Address to bind.
    #[arg(long, env = "PODIUM_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (0 picks a free port).
    #[arg(long, env = "PODIUM_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// CSV file holding the record table.
    #[arg(long, env = "PODIUM_RECORDS_PATH", default_value = DEFAULT_RECORDS_PATH)]
    pub records_path: PathBuf,

    /// Allowed CORS origin; repeat or comma-separate. `*` allows any.
    #[arg(
        long = "cors-origin",
        env = "PODIUM_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_origins: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "PODIUM_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "PODIUM_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl ServerArgs {
    #[must_use]
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..NetworkConfig::default()
        }
    }

    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            records_path: self.records_path.clone(),
        }
    }
}
