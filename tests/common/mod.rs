//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tierlog::{LogLevel, Logger};

/// A clonable in-memory writer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Console output with ANSI color codes removed; rewrite sequences kept.
    #[allow(dead_code)]
    pub fn plain_text(&self) -> String {
        strip_colors(&self.text())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Removes SGR color sequences (`ESC [ ... m`).
pub fn strip_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            let mut seq = String::from("\x1b[");
            chars.next();
            for next in chars.by_ref() {
                seq.push(next);
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            if !seq.ends_with('m') {
                out.push_str(&seq);
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Logger writing console and diagnostics into buffers.
#[allow(dead_code)]
pub fn capture_logger(level: LogLevel) -> (Arc<Logger>, SharedBuffer, SharedBuffer) {
    let console = SharedBuffer::default();
    let diagnostics = SharedBuffer::default();
    let logger = Logger::builder()
        .level(level)
        .console(console.clone())
        .diagnostics(diagnostics.clone())
        .build();
    (Arc::new(logger), console, diagnostics)
}
