//! StickyAPI
//!
//! Locale messages with `{placeholder|function:"argument"}` substitution and
//! color markers, and typed extraction of command arguments.
//!
//! The [`Sticky`] bundle loads both halves from one configuration file:
//!
//! ```no_run
//! use sticky::{Arguments, Sender, Sticky, StickyConfig};
//!
//! # fn main() -> Result<(), sticky::StickyError> {
//! let config = StickyConfig::load_from_file("sticky.toml")?;
//! sticky::logging::init(&config.logging)?;
//! let sticky = Sticky::from_config(config)?;
//!
//! let mut args = Arguments::parse_line("Steve 1h spamming");
//! args.required_string("player")
//!     .required_time_string("until")
//!     .optional_sentence("reason", Some("No reason given"), None);
//!
//! let message = sticky.command_message("mute.success", "mute", Sender::Console, &args)?;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::expect_used, clippy::unwrap_used)]

pub mod config;
pub mod logging;

use std::sync::Arc;

pub use command::{command_variables, Arguments, Sender};
pub use config::{ConfigError, ConfigFormat, StickyConfig};
pub use locale::{
    strip_colors, translate_colors, FunctionRegistry, Interpolator, LocaleConfig, LocaleError,
    LocaleProvider, NodeLookup, Variables, COLOR_CHAR,
};
pub use logging::{LogFormat, LoggingConfig, LoggingError};

// Sub-crates, for items not re-exported at the root.
pub use command;
pub use locale;
pub use util;

#[derive(Debug, thiserror::Error)]
pub enum StickyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Loaded configuration and locales.
#[derive(Debug)]
pub struct Sticky {
    config: StickyConfig,
    locale: LocaleProvider,
}

impl Sticky {
    /// Load the configured locale directory with the built-in placeholder functions.
    pub fn from_config(config: StickyConfig) -> Result<Self, StickyError> {
        Self::with_functions(config, FunctionRegistry::with_defaults())
    }

    /// Like [`from_config`](Self::from_config), with a custom function registry.
    pub fn with_functions(
        config: StickyConfig,
        functions: FunctionRegistry,
    ) -> Result<Self, StickyError> {
        config.validate()?;
        let locale = LocaleProvider::load(config.locale.clone(), Arc::new(functions))?;
        tracing::info!(
            "StickyAPI ready with {} placeholder function(s) and locales {:?}",
            locale.interpolator().functions().len(),
            locale.locales()
        );

        Ok(Self { config, locale })
    }

    pub fn config(&self) -> &StickyConfig {
        &self.config
    }

    pub fn locale(&self) -> &LocaleProvider {
        &self.locale
    }

    /// Re-read the locale directory.
    pub fn reload(&self) -> Result<usize, StickyError> {
        Ok(self.locale.reload()?)
    }

    pub fn translate(&self, node: &str, variables: &Variables) -> Result<String, StickyError> {
        Ok(self.locale.translate(node, variables)?)
    }

    /// Translate `node` for a command invocation.
    ///
    /// Parsed argument fields are available as placeholders alongside the
    /// standard command variables and take precedence over them.
    pub fn command_message(
        &self,
        node: &str,
        command: &str,
        sender: Sender<'_>,
        arguments: &Arguments,
    ) -> Result<String, StickyError> {
        let mut variables = command_variables(command, sender);
        variables.extend(&arguments.to_variables());
        self.translate(node, &variables)
    }
}
