//! Request-logging demo server.
//!
//! Reads its logging configuration from the file named by `TIERLOG_CONFIG`
//! (defaults when unset), watches it for changes and serves an echo endpoint
//! on `TIERLOG_BIND` (default `127.0.0.1:8080`), logging one REQ record per
//! request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use tierlog::bridge::init_tracing;
use tierlog::config::{load_config, ConfigWatcher, LoggingConfig};
use tierlog::http::HttpServer;
use tierlog::Logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var_os("TIERLOG_CONFIG").map(PathBuf::from);
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => LoggingConfig::default(),
    };

    let logger = Arc::new(Logger::from_config(&config)?);
    init_tracing(logger.clone())?;

    logger.info("tierlog v0.1.0 starting");

    let _watcher = match config_path {
        Some(path) => Some(ConfigWatcher::new(&path, logger.clone()).run()?),
        None => None,
    };

    let bind = std::env::var("TIERLOG_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = TcpListener::bind(&bind).await?;

    let server = HttpServer::new(logger.clone(), Duration::from_secs(30));
    server.run(listener).await?;

    logger.info("Shutdown complete");
    logger.close_file();
    Ok(())
}
