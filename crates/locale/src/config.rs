//! Locale settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::DEFAULT_COLOR_MARKER;
use crate::error::{LocaleError, Result};
use crate::placeholder::Interpolator;

/// Where locale files live and how messages are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Directory scanned for `*.toml` and `*.json` locale files
    pub directory: PathBuf,
    /// Locale used when a requested locale or node is missing
    pub default_locale: String,
    /// Sequence that introduces a color code in locale text
    pub color_marker: String,
    /// How deeply nodes may reference other nodes
    pub max_depth: usize,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("locale"),
            default_locale: "en_us".to_string(),
            color_marker: DEFAULT_COLOR_MARKER.to_string(),
            max_depth: Interpolator::DEFAULT_MAX_DEPTH,
        }
    }
}

impl LocaleConfig {
    /// Validate the locale configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_locale.trim().is_empty() {
            return Err(LocaleError::InvalidConfig(
                "Default locale cannot be empty".to_string(),
            ));
        }

        if self.color_marker.is_empty() {
            return Err(LocaleError::InvalidConfig(
                "Color marker cannot be empty".to_string(),
            ));
        }

        if self.max_depth == 0 {
            return Err(LocaleError::InvalidConfig(
                "Max depth must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_config_default() {
        let config = LocaleConfig::default();
        assert_eq!(config.default_locale, "en_us");
        assert_eq!(config.color_marker, "&");
        assert_eq!(config.max_depth, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_locale_config_validation() {
        let mut config = LocaleConfig::default();

        config.default_locale = "  ".to_string();
        assert!(config.validate().is_err());

        config.default_locale = "de_de".to_string();
        config.color_marker = String::new();
        assert!(config.validate().is_err());

        config.color_marker = "&".to_string();
        config.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LocaleConfig = toml::from_str("default_locale = \"fr_fr\"").unwrap();
        assert_eq!(config.default_locale, "fr_fr");
        assert_eq!(config.color_marker, "&");
    }
}
