//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the fixed origin routes
//! - Wire up middleware (tracing, request ID, timeout, metrics)
//! - Serve connections with peer address info until shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;

use crate::config::OriginConfig;
use crate::http::handlers::{self, AppState};
use crate::http::request::{
    capture_received_headers, propagate_request_id_layer, set_request_id_layer,
};
use crate::observability::{logging::http_trace_layer, metrics};

/// HTTP server for the origin.
pub struct OriginServer {
    router: Router,
    config: OriginConfig,
}

impl OriginServer {
    /// Create a new origin server with the given configuration.
    pub fn new(config: OriginConfig) -> Self {
        let state = AppState {
            origin_name: Arc::from(config.origin.name.as_str()),
            slow_delay: Duration::from_secs(config.origin.slow_delay_secs),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Only `GET` is routed; other methods on a known path get 405 and
    /// unknown paths get the JSON 404.
    #[allow(deprecated)]
    fn build_router(config: &OriginConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::status))
            .route("/headers", get(handlers::headers))
            .route("/slow", get(handlers::slow))
            .route("/error", get(handlers::error))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(http_trace_layer())
            .layer(set_request_id_layer())
            .layer(middleware::from_fn(capture_received_headers))
    }

    /// The fully layered router, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown channel fires.
    ///
    /// In-flight requests, including pending `/slow` calls, are allowed to
    /// finish before this returns.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = %self.config.origin.name,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
