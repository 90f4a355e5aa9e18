//! Log records and call sites.

use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Utc};

use crate::level::LogLevel;

/// The source location a record is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Placeholder for records with no resolvable origin.
    pub const fn unknown() -> Self {
        Self { file: "???", line: 0 }
    }

    /// The location of the nearest `#[track_caller]` boundary.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Final path component of the source file.
    pub fn file(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file(), self.line)
    }
}

/// One log entry, built when a leveled call is made.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub callsite: CallSite,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: String, callsite: CallSite) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            message,
            callsite,
        }
    }
}
