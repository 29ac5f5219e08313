//! Server Implementation
//!
//! HTTP server startup, middleware stack and graceful shutdown

use std::time::Duration;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::core::{Config, Result, ServerState};
use crate::utils::{AppError, ErrorCode};

/// Access log for every request
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    tracing::info!(target: "http_access", "{} {} {} {}ms", method, uri, status, elapsed_ms);

    response
}

/// Abort a request that runs past `limit`, answering with the regular
/// error body so clients see a `TimeoutError` code like any other failure.
async fn enforce_timeout(
    State(limit): State<Duration>,
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%method, %uri, limit_ms = limit.as_millis() as u64, "Request timed out");
            AppError::with_message(
                ErrorCode::TimeoutError,
                format!("Request exceeded {}ms", limit.as_millis()),
            )
            .into_response()
        }
    }
}

/// Build the full router with state and middleware
pub fn build_router(state: ServerState) -> Router {
    let timeout = state.config.request_timeout();
    api::build_app()
        .with_state(state)
        .layer(middleware::from_fn_with_state(timeout, enforce_timeout))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();
        let app = build_router(state.clone());
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on {addr} (env: {})", self.config.environment);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.config.shutdown_timeout()))
            .await?;

        state.db.close().await;
        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Resolve on Ctrl-C or SIGTERM, then arm a watchdog so a stuck request
/// cannot hold the process open past the configured grace period.
async fn shutdown_signal(grace: std::time::Duration) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, draining requests ({}ms)", grace.as_millis());

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::warn!("Graceful shutdown timed out, exiting");
        std::process::exit(1);
    });
}
