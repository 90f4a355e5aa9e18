//! Format-string entry points.
//!
//! ```rust
//! use tierlog::{log_info, log_warn, Logger};
//!
//! let logger = Logger::builder().console(std::io::sink()).build();
//! log_info!(logger, "listening on {}", "127.0.0.1:8080");
//! log_warn!(logger, "{} retries left", 2);
//! ```
//!
//! The call site recorded is the macro invocation.

#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_fmt($crate::LogLevel::Panic, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_fmt($crate::LogLevel::Error, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_fmt($crate::LogLevel::Warn, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_fmt($crate::LogLevel::Info, ::std::format_args!($($arg)+))
    };
}

/// Arguments are not formatted when DEBUG is unreachable.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_fmt($crate::LogLevel::Debug, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_request {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_fmt($crate::LogLevel::Request, ::std::format_args!($($arg)+))
    };
}
