//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::load_config;
use crate::error::LogResult;
use crate::format::CallSite;
use crate::level::LogLevel;
use crate::logger::Logger;

/// Watches a config file and applies changes to a running logger.
pub struct ConfigWatcher {
    path: PathBuf,
    logger: Arc<Logger>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, logger: Arc<Logger>) -> Self {
        Self {
            path: path.to_path_buf(),
            logger,
        }
    }

    /// Reloads the file and applies it. Failures are logged at ERROR and the
    /// running configuration is kept.
    pub fn reload(&self) -> bool {
        reload_into(&self.path, &self.logger)
    }

    /// Start watching in a background thread. Dropping the returned watcher
    /// stops it.
    pub fn run(self) -> LogResult<RecommendedWatcher> {
        let path = self.path.clone();
        let logger = self.logger.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Config file change detected, reloading");
                        reload_into(&path, &logger);
                    }
                }
                Err(e) => logger.log_at(
                    LogLevel::Error,
                    CallSite::unknown(),
                    format_args!("Config watch error: {e}"),
                ),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn reload_into(path: &Path, logger: &Logger) -> bool {
    let applied = load_config(path).and_then(|config| logger.apply_config(&config));
    match applied {
        Ok(()) => true,
        Err(e) => {
            logger.log_at(
                LogLevel::Error,
                CallSite::unknown(),
                format_args!("Failed to reload config: {e}. Keeping current configuration."),
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn quiet_logger() -> Arc<Logger> {
        Arc::new(
            Logger::builder()
                .console(std::io::sink())
                .diagnostics(std::io::sink())
                .build(),
        )
    }

    #[test]
    fn reload_applies_level_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("logging.toml");
        let log_path = dir.path().join("out/app.log");
        fs::write(
            &config_path,
            format!("level = \"warn\"\nfile = {:?}\n", log_path.to_str().unwrap()),
        )
        .unwrap();

        let logger = quiet_logger();
        let watcher = ConfigWatcher::new(&config_path, logger.clone());
        assert!(watcher.reload());

        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.file_path(), Some(log_path.clone()));
        let written = fs::read_to_string(&log_path).unwrap();
        assert!(written.contains("INFO: Log level set to WARN"));
    }

    #[test]
    fn bad_reload_keeps_current_level() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("logging.toml");
        fs::write(&config_path, "level = [\n").unwrap();

        let logger = quiet_logger();
        logger.set_level(LogLevel::Error);
        let watcher = ConfigWatcher::new(&config_path, logger.clone());
        assert!(!watcher.reload());
        assert_eq!(logger.level(), LogLevel::Error);
    }

    #[test]
    fn unopenable_file_leaves_level_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("logging.toml");
        // A directory cannot be opened as the log file.
        fs::write(
            &config_path,
            format!("level = \"debug\"\nfile = {:?}\n", dir.path().to_str().unwrap()),
        )
        .unwrap();

        let logger = quiet_logger();
        logger.set_level(LogLevel::Warn);
        assert!(!ConfigWatcher::new(&config_path, logger.clone()).reload());
        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.file_path(), None);
    }

    #[test]
    fn removing_file_key_disables_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("logging.toml");
        let logger = quiet_logger();
        logger.init_file_logging(dir.path().join("app.log")).unwrap();

        fs::write(&config_path, "level = \"info\"\n").unwrap();
        assert!(ConfigWatcher::new(&config_path, logger.clone()).reload());
        assert_eq!(logger.file_path(), None);
    }
}
