//! HTTP request logging subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, timeout layer, graceful shutdown)
//!     → middleware/request_log.rs (runs the handler, captures status)
//!     → Logger::request "<status> <method> <path>"
//! ```
//!
//! The middleware only uses the logger's public entry points.

pub mod middleware;
pub mod server;

pub use middleware::request_log::{request_log_middleware, RequestLogState};
pub use server::HttpServer;
