//! Global `tracing` subscriber setup

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Output layout of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives, e.g. `info` or `sticky_locale=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    pub ansi: bool,
    /// Include the event's module path
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            ansi: true,
            target: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directives}': {message}")]
    Filter { directives: String, message: String },

    #[error("A global subscriber has already been installed")]
    AlreadyInitialized,
}

/// Build the event filter for `config`.
pub fn filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level).map_err(|e| LoggingError::Filter {
        directives: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config)?)
        .with_ansi(config.ansi)
        .with_target(config.target);

    let result = match config.format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|_| LoggingError::AlreadyInitialized)?;
    tracing::debug!("Logging initialised with filter '{}'", config.level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_config() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        let config = LoggingConfig {
            level: "sticky_locale=debug,warn".to_string(),
            ..LoggingConfig::default()
        };
        assert!(filter(&config).is_ok());

        let config = LoggingConfig {
            level: "sticky_locale=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(filter(&config), Err(LoggingError::Filter { .. })));
    }

    #[test]
    fn test_init_only_once() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            ansi: false,
            ..LoggingConfig::default()
        };

        // The first call fails too if another test installed a subscriber.
        let _ = init(&config);
        assert!(matches!(init(&config), Err(LoggingError::AlreadyInitialized)));
    }

    #[test]
    fn test_format_names() {
        let config: LoggingConfig = toml::from_str("format = \"compact\"").unwrap();
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.ansi);
        assert!(toml::from_str::<LoggingConfig>("format = \"xml\"").is_err());
    }
}
