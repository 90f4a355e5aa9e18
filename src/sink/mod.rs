//! File sink subsystem.
//!
//! # Data Flow
//! ```text
//! append(line)
//!     → history buffer (every line, never pruned)
//!     → open handle, if any (write failure → diagnostics, handle kept)
//!
//! initialize(path)
//!     → "" disables the sink (history keeps growing)
//!     → mkdir -p parent (0750) → open append/create (0640)
//!     → on success: swap handle, replay full history once
//!     → on failure: previous handle untouched, error returned
//! ```

pub mod file;

pub use file::FileSink;
