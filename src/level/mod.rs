//! Level registry subsystem.
//!
//! # Data Flow
//! ```text
//! set_level / set_level_from_string
//!     → registry.rs (atomic swap of the threshold)
//!     → Logger emits one INFO audit record when the value changed
//!
//! every leveled call
//!     → snapshot of the threshold
//!     → DEBUG gate (unreachable below DEBUG)
//!     → console visibility (tier.rs: effective level <= threshold)
//! ```

pub mod registry;
pub mod tier;

pub use registry::LevelRegistry;
pub use tier::LogLevel;
