//! Console deduplication.
//!
//! A single slot remembers the last `(level, message)` shown on the console.
//! A matching record bumps the counter and is rendered as an in-place rewrite
//! of the previous line instead of a new one.
//!
//! # Rules
//! - File lines are never collapsed
//! - DEBUG records are always shown individually
//! - Anything else that differs from the slot replaces it with a count of 1

use std::sync::Mutex;

use crate::format::Destination;
use crate::level::LogLevel;

/// Outcome of checking a console record against the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Print as a new line.
    Show,
    /// Rewrite the previous line; carries the running repeat count.
    Repeat(u32),
}

impl Verdict {
    pub fn is_suppressed(self) -> bool {
        matches!(self, Verdict::Repeat(_))
    }
}

#[derive(Debug, Default)]
struct DedupState {
    last_level: Option<LogLevel>,
    last_message: String,
    repeat_count: u32,
}

/// Collapses consecutive identical console records.
#[derive(Debug, Default)]
pub struct Deduplicator {
    state: Mutex<DedupState>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares against the slot and updates it.
    pub fn should_suppress(&self, dest: Destination, level: LogLevel, message: &str) -> Verdict {
        if !dest.is_console() {
            return Verdict::Show;
        }

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if level != LogLevel::Debug
            && state.last_level == Some(level)
            && state.last_message == message
        {
            state.repeat_count += 1;
            return Verdict::Repeat(state.repeat_count);
        }

        state.last_level = Some(level);
        state.last_message.clear();
        state.last_message.push_str(message);
        state.repeat_count = 1;
        Verdict::Show
    }
}
