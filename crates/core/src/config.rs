//! Configuration file for StickyAPI: locale settings plus logging

use std::path::Path;

use locale::LocaleConfig;
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// Top-level configuration, usually read from `sticky.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickyConfig {
    pub locale: LocaleConfig,
    pub logging: LoggingConfig,
}

impl StickyConfig {
    /// Load configuration from file with format detection
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let config: StickyConfig = match ConfigFormat::from_extension(path) {
            ConfigFormat::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseFailed(format!("JSON parse error: {}", e)))?,
            ConfigFormat::Toml => toml::from_str(&content)
                .map_err(|e| ConfigError::ParseFailed(format!("TOML parse error: {}", e)))?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_extension(path) {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::ParseFailed(format!("JSON serialize error: {}", e)))?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::ParseFailed(format!("TOML serialize error: {}", e)))?,
        };

        std::fs::write(path, content)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locale
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("Log level cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Configuration file format detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access configuration file {0}")]
    Io(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sticky_config_default() {
        let config = StickyConfig::default();
        assert_eq!(config.locale.directory, PathBuf::from("locale"));
        assert_eq!(config.locale.default_locale, "en_us");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sticky_config_validation() {
        let mut config = StickyConfig::default();

        config.locale.max_depth = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.locale.max_depth = 8;
        config.logging.level = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[locale]\ndefault_locale = \"de_de\"\n\n[logging]\nformat = \"json\"").unwrap();
        file.flush().unwrap();

        let config = StickyConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.locale.default_locale, "de_de");
        assert_eq!(config.locale.color_marker, "&");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_operations() {
        let mut config = StickyConfig::default();
        config.locale.color_marker = "%".to_string();
        config.logging.level = "sticky_locale=debug".to_string();

        let toml_file = NamedTempFile::with_suffix(".toml").unwrap();
        config.save_to_file(toml_file.path()).unwrap();
        assert_eq!(StickyConfig::load_from_file(toml_file.path()).unwrap(), config);

        let json_file = NamedTempFile::with_suffix(".json").unwrap();
        config.save_to_file(json_file.path()).unwrap();
        let content = std::fs::read_to_string(json_file.path()).unwrap();
        assert!(content.trim_start().starts_with('{'));
        assert_eq!(StickyConfig::load_from_file(json_file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let err = StickyConfig::load_from_file("/nonexistent/sticky.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));

        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{ not json").unwrap();
        file.flush().unwrap();
        let err = StickyConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));

        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(b"[locale]\ncolor_marker = \"\"\n").unwrap();
        file.flush().unwrap();
        let err = StickyConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_extension(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_extension(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_extension(Path::new("sticky")), ConfigFormat::Toml);
    }
}
