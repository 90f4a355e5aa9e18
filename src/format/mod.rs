//! Record formatting subsystem.
//!
//! # Data Flow
//! ```text
//! leveled call (#[track_caller])
//!     → record.rs (LogRecord: level, UTC timestamp, message, CallSite)
//!     → render.rs
//!         File              → "<utc> <file>:<line> <LEVEL>: <msg>"
//!         ConsolePlain      → "<local> <LEVEL>: <msg>"             (colored)
//!         ConsoleWithCaller → "<local> <file>:<line> <LEVEL>: <msg>" (colored, DEBUG only)
//! ```

pub mod record;
pub mod render;

pub use record::{CallSite, LogRecord};
pub use render::{render, render_repeat, Destination};
