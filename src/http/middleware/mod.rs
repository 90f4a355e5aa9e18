//! Axum middleware.

pub mod request_log;
