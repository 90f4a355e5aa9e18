//! PANIC-tier escalation.

use std::fmt;

use crate::format::LogRecord;

/// Replaces the default `panic!` raised after a PANIC-tier record is logged.
///
/// The handler runs after the record reached both sinks and no logger lock is
/// held, so it may log again or unwind freely.
pub struct EscalationHandler {
    handler: Box<dyn Fn(&LogRecord) + Send + Sync>,
}

impl EscalationHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    pub(crate) fn invoke(&self, record: &LogRecord) {
        (self.handler)(record)
    }
}

impl fmt::Debug for EscalationHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EscalationHandler")
    }
}
