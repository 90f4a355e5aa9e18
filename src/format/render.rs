//! Destination-specific line rendering.

use chrono::Local;

use super::record::LogRecord;
use crate::level::LogLevel;

pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_RED: &str = "\x1b[31m";
pub const COLOR_YELLOW: &str = "\x1b[33m";
pub const COLOR_BLUE: &str = "\x1b[34m";
pub const COLOR_DARK_GREY: &str = "\x1b[90m";

/// Cursor up one row, column zero, clear line.
pub const ERASE_PREVIOUS_LINE: &str = "\x1b[F\r\x1b[K";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a rendered line is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Colored console line without call site.
    ConsolePlain,
    /// Colored console line with call site, used while the threshold is DEBUG.
    ConsoleWithCaller,
    /// Uncolored UTC line for the log file.
    File,
}

impl Destination {
    /// Console variant for the given threshold snapshot.
    pub fn console_for(threshold: LogLevel) -> Self {
        if threshold == LogLevel::Debug {
            Destination::ConsoleWithCaller
        } else {
            Destination::ConsolePlain
        }
    }

    pub fn is_console(self) -> bool {
        !matches!(self, Destination::File)
    }
}

fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Panic | LogLevel::Error => COLOR_RED,
        LogLevel::Warn | LogLevel::Debug => COLOR_YELLOW,
        LogLevel::Info => COLOR_BLUE,
        LogLevel::Request => COLOR_DARK_GREY,
    }
}

/// Renders `record` for `dest`, without a trailing newline.
pub fn render(record: &LogRecord, dest: Destination) -> String {
    let level = record.level;
    match dest {
        Destination::ConsolePlain => format!(
            "{COLOR_DARK_GREY}{} {}{}{COLOR_RESET}: {}",
            record.timestamp.with_timezone(&Local).format(TIMESTAMP_FORMAT),
            level_color(level),
            level.label(),
            record.message,
        ),
        Destination::ConsoleWithCaller => format!(
            "{COLOR_DARK_GREY}{} {} {}{}{COLOR_RESET}: {}",
            record.timestamp.with_timezone(&Local).format(TIMESTAMP_FORMAT),
            record.callsite,
            level_color(level),
            level.label(),
            record.message,
        ),
        Destination::File => format!(
            "{} {} {}: {}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.callsite,
            level.label(),
            record.message,
        ),
    }
}

/// Rewrite sequence for the `count`-th consecutive copy of a console line.
pub fn render_repeat(console_line: &str, count: u32) -> String {
    format!("{ERASE_PREVIOUS_LINE}{console_line} {COLOR_YELLOW}({count}x){COLOR_RESET}\n")
}
