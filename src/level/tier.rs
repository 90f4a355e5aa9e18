//! Severity tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// A log tier. Lower numeric value means higher severity.
///
/// `Request` sits outside the severity ladder: it is filtered as `Info` but
/// keeps its own `REQ` label.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Panic = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Request = 5,
}

impl LogLevel {
    /// Tiers in increasing verbosity, `Request` last.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Panic,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Request,
    ];

    /// The tier used when comparing against a console threshold.
    pub const fn effective(self) -> LogLevel {
        match self {
            LogLevel::Request => LogLevel::Info,
            other => other,
        }
    }

    /// Numeric verbosity of the effective tier.
    pub const fn verbosity(self) -> u8 {
        self.effective() as u8
    }

    /// Whether a record at this tier is visible under `threshold`.
    pub const fn visible_at(self, threshold: LogLevel) -> bool {
        self.verbosity() <= threshold.verbosity()
    }

    /// Label printed in every rendered line.
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Panic => "PANIC",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Request => "REQ",
        }
    }
}

impl From<u8> for LogLevel {
    fn from(val: u8) -> Self {
        match val {
            0 => LogLevel::Panic,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            4 => LogLevel::Debug,
            5 => LogLevel::Request,
            _ => LogLevel::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    /// Parses a threshold name. `request` is not a threshold and is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "panic" => Ok(LogLevel::Panic),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}
