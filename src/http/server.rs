//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the echo handler
//! - Wire up middleware (timeout, request logging)
//! - Serve with graceful shutdown on Ctrl+C

use axum::{
    body::Bytes,
    http::{Method, StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use super::middleware::request_log::{request_log_middleware, RequestLogState};
use crate::logger::Logger;

/// Demo server whose every request is logged at the REQ tier.
pub struct HttpServer {
    router: Router,
    logger: Arc<Logger>,
}

impl HttpServer {
    #[track_caller]
    pub fn new(logger: Arc<Logger>, request_timeout: Duration) -> Self {
        let router = Self::build_router(RequestLogState::new(logger.clone()), request_timeout);
        Self { router, logger }
    }

    #[allow(deprecated)]
    fn build_router(state: RequestLogState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler))
            .layer(TimeoutLayer::new(request_timeout))
            .layer(middleware::from_fn_with_state(state, request_log_middleware))
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        self.logger.info(format_args!("HTTP server listening on {addr}"));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.logger.info("HTTP server stopped");
        Ok(())
    }
}

async fn echo_handler(method: Method, uri: Uri, body: Bytes) -> impl IntoResponse {
    if uri.path() == "/health" {
        return (StatusCode::OK, "ok".to_string());
    }
    (
        StatusCode::OK,
        format!("{} {} ({} bytes)", method, uri.path(), body.len()),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
