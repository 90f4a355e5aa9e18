//! Logger construction.

use std::io::{self, Write};
use std::sync::Mutex;

use arc_swap::ArcSwapOption;

use super::escalation::EscalationHandler;
use super::Logger;
use crate::dedup::Deduplicator;
use crate::format::LogRecord;
use crate::level::{LevelRegistry, LogLevel};
use crate::sink::FileSink;

/// Builder for [`Logger`].
///
/// Defaults: INFO threshold, stdout console, stderr diagnostics, no file,
/// default `panic!` escalation.
#[must_use]
pub struct LoggerBuilder {
    level: LogLevel,
    console: Option<Box<dyn Write + Send>>,
    diagnostics: Option<Box<dyn Write + Send>>,
    escalation: Option<EscalationHandler>,
}

impl LoggerBuilder {
    pub(crate) fn new() -> Self {
        Self {
            level: LogLevel::Info,
            console: None,
            diagnostics: None,
            escalation: None,
        }
    }

    /// Initial console threshold. No audit record is emitted for it.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Writer receiving console lines and rewrite sequences.
    pub fn console(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(writer));
        self
    }

    /// Writer receiving file sink failure reports.
    pub fn diagnostics(mut self, writer: impl Write + Send + 'static) -> Self {
        self.diagnostics = Some(Box::new(writer));
        self
    }

    /// Handler invoked instead of `panic!` after a PANIC-tier record.
    pub fn escalation<F>(mut self, handler: F) -> Self
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.escalation = Some(EscalationHandler::new(handler));
        self
    }

    pub fn build(self) -> Logger {
        let console: Box<dyn Write + Send> = match self.console {
            Some(writer) => writer,
            None => Box::new(io::stdout()),
        };
        let diagnostics: Box<dyn Write + Send> = match self.diagnostics {
            Some(writer) => writer,
            None => Box::new(io::stderr()),
        };

        Logger {
            level: LevelRegistry::new(self.level),
            dedup: Deduplicator::new(),
            file: FileSink::new(diagnostics),
            console: Mutex::new(console),
            escalation: ArcSwapOption::from_pointee(self.escalation),
        }
    }
}
