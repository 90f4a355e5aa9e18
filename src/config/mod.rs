//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggingConfig
//!     → Logger::from_config / Logger::apply_config
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → Logger::apply_config (file path, then level)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is valid
//! - A failed reload keeps the running configuration

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::load_config;
pub use schema::LoggingConfig;
pub use watcher::ConfigWatcher;
