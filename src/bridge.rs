//! Bridge from the `tracing` ecosystem into a [`Logger`].
//!
//! Libraries in the stack (axum, tower-http, notify callbacks in this crate)
//! report through `tracing` macros. [`TracingBridge`] is a subscriber layer
//! that turns each event into a leveled call, so those events share the
//! logger's threshold, deduplication and file history.
//!
//! ```rust,ignore
//! let logger = Arc::new(Logger::new());
//! tierlog::bridge::init_tracing(logger.clone())?;
//! tracing::warn!(attempt = 3, "upstream slow");
//! // → "... WARN: upstream slow attempt=3"
//! ```

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::format::CallSite;
use crate::level::LogLevel;
use crate::logger::Logger;

/// A tracing layer forwarding events to a [`Logger`].
pub struct TracingBridge {
    logger: Arc<Logger>,
}

impl TracingBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// TRACE folds into DEBUG; there is no finer tier.
    const fn map_level(level: &Level) -> LogLevel {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG | Level::TRACE => LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for TracingBridge
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::map_level(metadata.level());

        // Skip formatting entirely when DEBUG would be dropped anyway.
        if level == LogLevel::Debug && self.logger.level() != LogLevel::Debug {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let callsite = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => CallSite::new(file, line),
            _ => CallSite::unknown(),
        };

        self.logger.log_at(level, callsite, visitor.finish());
    }
}

/// Collects the `message` field plus any other fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

/// Installs a global subscriber that forwards every event to `logger`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(
    logger: Arc<Logger>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(TracingBridge::new(logger))
        .try_init()
}
