//! Network module with deferred startup lifecycle.
//!
//! `new()` assembles shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until shutdown. The record table is
//! initialized by the caller before `serve()`, so readiness only flips once
//! the table exists.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{
    add_record_handler, health_handler, list_records_handler, liveness_handler, podium_handler,
    readiness_handler, root_handler, AppState,
};
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;
use crate::service::LeaderboardService;

/// Owns the HTTP server lifecycle.
pub struct NetworkModule {
    config: Arc<NetworkConfig>,
    listener: Option<TcpListener>,
    state: AppState,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, service: Arc<LeaderboardService>) -> Self {
        let config = Arc::new(config);
        let state = AppState::new(service, Arc::clone(&config));
        Self {
            config,
            listener: None,
            state,
        }
    }

    /// Shared shutdown controller, for health checks or triggering shutdown
    /// from outside the server.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.state.shutdown)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /` -- welcome message
    /// - `GET /records` -- full table in rank order
    /// - `GET /podium` -- records ranked third or better
    /// - `POST /add-record` -- submit a record
    /// - `GET /health`, `/health/live`, `/health/ready` -- probes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/records", get(list_records_handler))
            .route("/podium", get(podium_handler))
            .route("/add-record", post(add_record_handler))
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                track_in_flight,
            ))
            .layer(build_http_layers(&self.config))
            .with_state(self.state.clone())
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the bound port, which differs from the configured one when
    /// port 0 asks the OS for an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves, then drains.
    ///
    /// When the signal fires the health state moves to Draining, axum stops
    /// accepting connections, and in-flight requests get up to
    /// `drain_timeout` to finish before the state moves to Stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;
        let router = self.build_router();
        let controller = self.shutdown_controller();

        controller.set_ready();
        info!("Serving HTTP connections");

        let signal_ctrl = Arc::clone(&controller);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown signal received, draining");
                signal_ctrl.trigger_shutdown();
            })
            .await?;

        // Covers a server that stopped without the signal firing.
        controller.trigger_shutdown();
        if controller.wait_for_drain(self.config.drain_timeout).await {
            info!("All in-flight requests drained");
        } else {
            warn!(
                in_flight = controller.in_flight_count(),
                "Drain timeout expired with in-flight requests remaining"
            );
        }
        Ok(())
    }
}

/// Holds an in-flight guard for the lifetime of each request.
async fn track_in_flight(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let _guard = state.shutdown.in_flight_guard();
    next.run(request).await
}
