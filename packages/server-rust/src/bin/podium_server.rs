use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use podium_server::{LeaderboardService, LogFormat, NetworkModule, ServerArgs};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "podium_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_tracing(args.log_format);

    let service = LeaderboardService::open(&args.service_config());
    service
        .initialize()
        .await
        .with_context(|| format!("Cannot initialize {}", args.records_path.display()))?;

    let mut network = NetworkModule::new(args.network_config(), Arc::new(service));
    let port = network
        .start()
        .await
        .with_context(|| format!("Cannot bind {}:{}", args.host, args.port))?;
    info!(port, records = %args.records_path.display(), "podium server started");

    network.serve(shutdown_signal()).await?;
    info!("podium server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
