//! Configuration validation.
//!
//! Serde handles syntax; this checks values that deserialize fine but cannot
//! be applied. All errors are returned, not just the first.

use std::fmt;

use super::schema::LoggingConfig;
use crate::level::LogLevel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `request` is a display tier, not a threshold.
    RequestThreshold,
    /// `file = ""`; omit the key to disable file output.
    EmptyFilePath,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::RequestThreshold => {
                write!(f, "level 'request' cannot be used as a threshold")
            }
            ValidationError::EmptyFilePath => {
                write!(f, "file path is empty (omit it to disable file logging)")
            }
        }
    }
}

pub fn validate_config(config: &LoggingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.level == LogLevel::Request {
        errors.push(ValidationError::RequestThreshold);
    }
    if config
        .file
        .as_ref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        errors.push(ValidationError::EmptyFilePath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
