//! Console threshold storage.

use std::sync::atomic::{AtomicU8, Ordering};

use super::tier::LogLevel;

/// Holds the current console threshold.
///
/// Reads and writes go through one atomic, so a reader never observes a torn
/// or stale-by-race value while another thread changes the level.
#[derive(Debug)]
pub struct LevelRegistry {
    current: AtomicU8,
}

impl LevelRegistry {
    pub fn new(level: LogLevel) -> Self {
        Self {
            current: AtomicU8::new(level.effective() as u8),
        }
    }

    /// Current threshold.
    pub fn get(&self) -> LogLevel {
        LogLevel::from(self.current.load(Ordering::Acquire))
    }

    /// Replaces the threshold and returns the previous one.
    ///
    /// `Request` is stored as `Info`.
    pub fn replace(&self, level: LogLevel) -> LogLevel {
        LogLevel::from(self.current.swap(level.effective() as u8, Ordering::AcqRel))
    }

    /// Whether DEBUG-tier calls reach the dispatcher under `threshold`.
    pub fn debug_reachable(threshold: LogLevel) -> bool {
        threshold == LogLevel::Debug
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn defaults_to_info() {
        assert_eq!(LevelRegistry::default().get(), LogLevel::Info);
    }

    #[test]
    fn replace_returns_previous() {
        let registry = LevelRegistry::default();
        assert_eq!(registry.replace(LogLevel::Debug), LogLevel::Info);
        assert_eq!(registry.get(), LogLevel::Debug);
    }

    #[test]
    fn request_is_stored_as_info() {
        let registry = LevelRegistry::new(LogLevel::Error);
        registry.replace(LogLevel::Request);
        assert_eq!(registry.get(), LogLevel::Info);
    }

    #[test]
    fn debug_gate_only_open_at_debug() {
        assert!(LevelRegistry::debug_reachable(LogLevel::Debug));
        for level in [LogLevel::Panic, LogLevel::Error, LogLevel::Warn, LogLevel::Info] {
            assert!(!LevelRegistry::debug_reachable(level));
        }
    }

    #[test]
    fn concurrent_writers_leave_a_valid_level() {
        let registry = Arc::new(LevelRegistry::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let level = if i % 2 == 0 { LogLevel::Debug } else { LogLevel::Warn };
                        registry.replace(level);
                        let seen = registry.get();
                        assert!(seen == LogLevel::Debug || seen == LogLevel::Warn);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
