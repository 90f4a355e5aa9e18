//! Multi-destination logging engine.
//!
//! ```text
//! leveled call ──▶ Logger ──▶ FileSink      (every record, buffered history)
//!                    │
//!                    └──────▶ console       (threshold-filtered, deduplicated)
//!                    │
//!                    └──────▶ escalation    (PANIC tier, after both sinks)
//! ```
//!
//! Collaborators built on the public API: [`http`] request logging,
//! [`process`] subprocess output piping and the [`bridge`] from `tracing`.

pub mod bridge;
pub mod config;
pub mod dedup;
pub mod error;
pub mod format;
pub mod http;
pub mod level;
pub mod logger;
pub mod process;
pub mod sink;

mod macros;

pub use config::LoggingConfig;
pub use error::{LogError, LogResult};
pub use format::{CallSite, LogRecord};
pub use level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
