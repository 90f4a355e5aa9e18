//! Dispatcher subsystem.
//!
//! # Data Flow
//! ```text
//! info / warn / error / debug / panic / request  (#[track_caller])
//!     → threshold snapshot
//!     → DEBUG gate: below DEBUG the call ends here, nothing is recorded
//!     → LogRecord
//!     → FILE line → FileSink::append            (always)
//!     → console visible? (REQ compares as INFO)
//!         → console lock
//!             → Deduplicator: Show   → new line
//!                             Repeat → erase previous line, reprint with (Nx)
//!     → PANIC? → escalation handler, or panic!   (after both sinks)
//! ```
//!
//! # Locks
//! - threshold: atomic, no lock
//! - dedup slot: taken inside the console lock, released before the write
//! - file sink: held across history append and file write
//! - console: held across the dedup decision and the write, so a rewrite
//!   always targets the line this logger printed last

pub mod builder;
pub mod escalation;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;

use crate::config::LoggingConfig;
use crate::dedup::{Deduplicator, Verdict};
use crate::error::LogResult;
use crate::format::{render, render_repeat, CallSite, Destination, LogRecord};
use crate::level::{LevelRegistry, LogLevel};
use crate::sink::FileSink;

pub use builder::LoggerBuilder;
pub use escalation::EscalationHandler;

/// A multi-destination logger: console with deduplication plus a buffering
/// file sink.
///
/// Share it between threads with `Arc<Logger>`.
pub struct Logger {
    level: LevelRegistry,
    dedup: Deduplicator,
    file: FileSink,
    console: Mutex<Box<dyn Write + Send>>,
    escalation: ArcSwapOption<EscalationHandler>,
}

impl Logger {
    /// Logger with default settings: INFO, stdout, stderr diagnostics.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Builds a stdout logger and applies `config` to it.
    #[track_caller]
    pub fn from_config(config: &LoggingConfig) -> LogResult<Self> {
        let logger = Self::builder().level(config.level).build();
        if let Some(path) = &config.file {
            logger.init_file_logging(path)?;
        }
        Ok(logger)
    }

    // ---------------------------------------------------------------------
    // Level registry
    // ---------------------------------------------------------------------

    /// Current console threshold.
    pub fn level(&self) -> LogLevel {
        self.level.get()
    }

    /// Replaces the console threshold.
    ///
    /// A change emits one INFO record announcing the new level; setting the
    /// current value again does nothing.
    #[track_caller]
    pub fn set_level(&self, level: LogLevel) {
        let level = level.effective();
        let previous = self.level.replace(level);
        if previous != level {
            self.dispatch(
                LogLevel::Info,
                format_args!("Log level set to {}", level.label()),
                CallSite::caller(),
            );
        }
    }

    /// Parses `name` (`debug|info|warn|error|panic`, any case) and applies it.
    /// On error the level is left unchanged.
    #[track_caller]
    pub fn set_level_from_string(&self, name: &str) -> LogResult<()> {
        let level = name.parse()?;
        self.set_level(level);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // File sink
    // ---------------------------------------------------------------------

    /// Starts writing to `path`, replaying every line logged so far.
    ///
    /// An empty path disables file output. A failed open keeps the previous
    /// file (if any) in place.
    #[track_caller]
    pub fn init_file_logging(&self, path: impl AsRef<Path>) -> LogResult<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            self.dispatch(
                LogLevel::Info,
                format_args!("File logging disabled (no path provided)"),
                CallSite::caller(),
            );
        }
        self.file.initialize(path)
    }

    /// Closes the log file. Later records are still buffered.
    ///
    /// A file opened by a concurrent `init_file_logging` after the audit line
    /// was written stays open.
    #[track_caller]
    pub fn close_file(&self) {
        if let Some(path) = self.file.path() {
            self.dispatch(
                LogLevel::Info,
                format_args!("Closing log file: {}", path.display()),
                CallSite::caller(),
            );
            self.file.close_if(&path);
        }
    }

    /// Path of the open log file.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.path()
    }

    /// Number of FILE lines kept in the replay history.
    pub fn buffered_lines(&self) -> usize {
        self.file.pending_len()
    }

    /// Applies a (re)loaded configuration: the file path first, then the
    /// level. A file that fails to open leaves both unchanged.
    #[track_caller]
    pub fn apply_config(&self, config: &LoggingConfig) -> LogResult<()> {
        match (&config.file, self.file.path()) {
            (Some(wanted), Some(current)) if *wanted == current => {}
            (Some(wanted), _) => self.init_file_logging(wanted)?,
            (None, Some(_)) => self.init_file_logging("")?,
            (None, None) => {}
        }
        self.set_level(config.level);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Escalation
    // ---------------------------------------------------------------------

    /// Installs a handler that replaces the default `panic!` for PANIC records.
    pub fn set_escalation_handler<F>(&self, handler: F)
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        self.escalation
            .store(Some(Arc::new(EscalationHandler::new(handler))));
    }

    /// Restores the default `panic!` escalation.
    pub fn clear_escalation_handler(&self) {
        self.escalation.store(None);
    }

    // ---------------------------------------------------------------------
    // Leveled entry points
    // ---------------------------------------------------------------------

    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Panic, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Error, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Warn, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Info, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Debug, format_args!("{message}"), CallSite::caller());
    }

    #[track_caller]
    pub fn request(&self, message: impl fmt::Display) {
        self.dispatch(LogLevel::Request, format_args!("{message}"), CallSite::caller());
    }

    /// Format-string entry point used by the `log_*!` macros.
    #[track_caller]
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.dispatch(level, args, CallSite::caller());
    }

    /// Logs with an explicit call site, for forwarded records.
    pub fn log_at(&self, level: LogLevel, callsite: CallSite, message: impl fmt::Display) {
        self.dispatch(level, format_args!("{message}"), callsite);
    }

    fn dispatch(&self, level: LogLevel, args: fmt::Arguments<'_>, callsite: CallSite) {
        let threshold = self.level.get();
        if level == LogLevel::Debug && !LevelRegistry::debug_reachable(threshold) {
            return;
        }

        let record = LogRecord::new(level, args.to_string(), callsite);

        self.file.append(&render(&record, Destination::File));

        if record.level.visible_at(threshold) {
            self.write_console(&record, Destination::console_for(threshold));
        }

        if record.level == LogLevel::Panic {
            self.escalate(&record);
        }
    }

    fn write_console(&self, record: &LogRecord, dest: Destination) {
        let line = render(record, dest);
        let mut console = self.console.lock().unwrap_or_else(|e| e.into_inner());

        let output = match self.dedup.should_suppress(dest, record.level, &record.message) {
            Verdict::Show => line + "\n",
            Verdict::Repeat(count) => render_repeat(&line, count),
        };

        let _ = console.write_all(output.as_bytes());
        let _ = console.flush();
    }

    fn escalate(&self, record: &LogRecord) {
        match self.escalation.load_full() {
            Some(handler) => handler.invoke(record),
            None => panic!("{}", record.message),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level.get())
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn logger(level: LogLevel) -> (Logger, Captured) {
        let console = Captured::default();
        let logger = Logger::builder()
            .level(level)
            .console(console.clone())
            .diagnostics(io::sink())
            .build();
        (logger, console)
    }

    #[test]
    fn debug_below_threshold_records_nothing() {
        let (logger, console) = logger(LogLevel::Info);
        logger.debug("hidden");
        crate::log_debug!(logger, "hidden {}", 2);
        assert_eq!(logger.buffered_lines(), 0);
        assert!(console.text().is_empty());
    }

    #[test]
    fn filtered_tiers_still_reach_the_file() {
        let (logger, console) = logger(LogLevel::Error);
        logger.warn("w");
        logger.info("i");
        logger.request("r");
        assert_eq!(logger.buffered_lines(), 3);
        assert!(console.text().is_empty());
    }

    #[test]
    fn set_level_emits_audit_once() {
        let (logger, console) = logger(LogLevel::Info);
        logger.set_level(LogLevel::Warn);
        logger.set_level(LogLevel::Warn);
        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.buffered_lines(), 1);
        // The audit is INFO and the new threshold is WARN.
        assert!(console.text().is_empty());

        logger.set_level(LogLevel::Debug);
        assert!(console.text().contains("Log level set to DEBUG"));
    }

    #[test]
    fn set_level_from_string_rejects_unknown() {
        let (logger, _) = logger(LogLevel::Warn);
        assert!(logger.set_level_from_string("loud").is_err());
        assert_eq!(logger.level(), LogLevel::Warn);
        logger.set_level_from_string("DeBuG").unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[test]
    fn caller_shown_only_in_debug_mode() {
        let (logger, console) = logger(LogLevel::Info);
        logger.info("plain");
        assert!(!console.text().contains("mod.rs:"));

        logger.set_level(LogLevel::Debug);
        logger.info("detailed");
        let text = console.text();
        let last = text.lines().last().unwrap();
        assert!(last.contains("mod.rs:"), "{last}");
    }

    #[test]
    fn escalation_runs_after_sinks() {
        let (logger, console) = logger(LogLevel::Info);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let console_at_escalation = console.clone();
        logger.set_escalation_handler(move |record| {
            assert_eq!(record.level, LogLevel::Panic);
            assert!(console_at_escalation.text().contains("PANIC"));
            seen.fetch_add(1, Ordering::SeqCst);
        });

        logger.panic("fatal");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(logger.buffered_lines(), 1);
    }

    #[test]
    #[should_panic(expected = "out of memory")]
    fn panic_without_handler_raises() {
        let (logger, _) = logger(LogLevel::Info);
        logger.panic("out of memory");
    }

    #[test]
    fn cleared_handler_restores_default() {
        let (logger, _) = logger(LogLevel::Info);
        logger.set_escalation_handler(|_| {});
        logger.panic("handled");
        logger.clear_escalation_handler();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| logger.panic("raised")));
        assert!(result.is_err());
    }

    #[test]
    fn close_without_file_is_silent() {
        let (logger, _) = logger(LogLevel::Info);
        logger.close_file();
        assert_eq!(logger.buffered_lines(), 0);
    }
}
