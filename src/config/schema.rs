//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::level::LogLevel;

/// Logger configuration.
///
/// ```toml
/// level = "debug"
/// file = "/var/log/app/app.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Console threshold.
    pub level: LogLevel,

    /// Log file path. Omit to keep file output disabled.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
        }
    }
}
