//! Error types.
//!
//! Only setup paths return errors: level parsing, file sink initialization,
//! configuration loading and subprocess attachment. Leveled log calls never do.

use std::io;
use std::path::PathBuf;

use crate::config::validation::ValidationError;

/// Errors surfaced to callers configuring the logger.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("failed to create log directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file '{}': {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to pipe {0}: stream was not captured")]
    MissingPipe(&'static str),

    #[error("failed to spawn command: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error("config validation failed: {}", join_errors(.0))]
    ConfigValidation(Vec<ValidationError>),

    #[error("config watch error: {0}")]
    Watch(#[from] notify::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used across the crate.
pub type LogResult<T> = Result<T, LogError>;
