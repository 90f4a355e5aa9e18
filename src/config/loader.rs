//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use super::schema::LoggingConfig;
use super::validation::validate_config;
use crate::error::{LogError, LogResult};

/// Load and validate configuration from a TOML or JSON file.
///
/// The format is picked by extension; anything other than `.json` is TOML.
pub fn load_config(path: &Path) -> LogResult<LoggingConfig> {
    let content = fs::read_to_string(path).map_err(|source| LogError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;

    let config: LoggingConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            serde_json::from_str(&content).map_err(|e| LogError::ConfigParse(e.to_string()))?
        }
        _ => toml::from_str(&content).map_err(|e| LogError::ConfigParse(e.to_string()))?,
    };

    validate_config(&config).map_err(LogError::ConfigValidation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use std::path::PathBuf;

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        fs::write(&path, "level = \"debug\"\nfile = \"/tmp/app.log\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/app.log")));
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.json");
        fs::write(&path, r#"{"level": "warn"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.file, None);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        fs::write(&path, "").unwrap();
        assert_eq!(load_config(&path).unwrap(), LoggingConfig::default());
    }

    #[test]
    fn unknown_level_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        fs::write(&path, "level = \"chatty\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(LogError::ConfigParse(_))));
    }

    #[test]
    fn request_level_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        fs::write(&path, "level = \"request\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(LogError::ConfigValidation(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, LogError::ConfigIo { .. }));
    }
}
