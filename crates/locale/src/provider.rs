//! Locale files and node lookup
//!
//! A [`LocaleProvider`] owns every loaded locale and acts as the
//! [`NodeLookup`] for translations. Each file in the locale directory is one
//! locale, named after the file stem (`en_us.toml` is `en_us`). Nested
//! tables flatten into dotted node names:
//!
//! ```toml
//! prefix = "&8[&bSticky&8]&r"
//!
//! [ban]
//! success = "{prefix} Banned {player} for {duration|duration}."
//! ```
//!
//! yields the nodes `prefix` and `ban.success`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::color::translate_colors;
use crate::config::LocaleConfig;
use crate::error::{LocaleError, Result};
use crate::functions::FunctionRegistry;
use crate::placeholder::{Interpolator, NodeLookup};
use crate::variables::Variables;

/// Node name to raw text for a single locale
pub type Nodes = HashMap<String, String>;

/// Supported locale file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleFormat {
    Json,
    Toml,
}

impl LocaleFormat {
    /// Detect the format from a file extension; other files are not locales.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse file contents into flattened nodes.
    pub fn parse(self, content: &str) -> std::result::Result<Nodes, String> {
        let mut nodes = Nodes::new();
        match self {
            Self::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(content).map_err(|e| e.to_string())?;
                flatten_json("", &value, &mut nodes);
            }
            Self::Toml => {
                let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
                for (key, value) in &table {
                    flatten_toml(key, value, &mut nodes);
                }
            }
        }
        Ok(nodes)
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

fn flatten_json(prefix: &str, value: &serde_json::Value, out: &mut Nodes) {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_json(&join_key(prefix, key), value, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_owned(), text.clone());
        }
        Value::Array(items) => {
            // Lists are multi-line messages.
            let lines: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect();
            out.insert(prefix.to_owned(), lines.join("\n"));
        }
        Value::Number(n) => {
            out.insert(prefix.to_owned(), n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix.to_owned(), b.to_string());
        }
        Value::Null => {}
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, out: &mut Nodes) {
    use toml::Value;

    let scalar = |value: &Value| match value {
        Value::String(text) => Some(text.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    };

    match value {
        Value::Table(table) => {
            for (key, value) in table {
                flatten_toml(&join_key(prefix, key), value, out);
            }
        }
        Value::Array(items) => {
            let lines: Vec<String> = items.iter().filter_map(scalar).collect();
            out.insert(prefix.to_owned(), lines.join("\n"));
        }
        other => {
            if let Some(text) = scalar(other) {
                out.insert(prefix.to_owned(), text);
            }
        }
    }
}

/// `en-US` and `EN_us` both become `en_us`.
fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace('-', "_")
}

/// Loaded locales plus the interpolator used to render them.
///
/// Safe to share between threads; [`reload`](Self::reload) swaps the whole
/// locale table at once so readers never see a half-loaded directory.
pub struct LocaleProvider {
    config: LocaleConfig,
    interpolator: Interpolator,
    locales: RwLock<HashMap<String, Nodes>>,
}

impl LocaleProvider {
    /// Create a provider with no locales loaded.
    pub fn new(config: LocaleConfig, functions: Arc<FunctionRegistry>) -> Result<Self> {
        config.validate()?;
        let interpolator = Interpolator::new(functions).with_max_depth(config.max_depth);

        Ok(Self {
            config,
            interpolator,
            locales: RwLock::new(HashMap::new()),
        })
    }

    /// Create a provider and load the configured locale directory.
    pub fn load(config: LocaleConfig, functions: Arc<FunctionRegistry>) -> Result<Self> {
        let provider = Self::new(config, functions)?;
        provider.reload()?;
        Ok(provider)
    }

    /// Re-read every locale file in the configured directory.
    ///
    /// On error the previously loaded locales stay in place. On success they
    /// are replaced entirely, including any added with
    /// [`insert_locale`](Self::insert_locale).
    pub fn reload(&self) -> Result<usize> {
        let directory = &self.config.directory;
        let mut loaded = HashMap::new();

        for entry in std::fs::read_dir(directory)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(format) = LocaleFormat::from_extension(&path) else {
                tracing::debug!("Skipping non-locale file {}", path.display());
                continue;
            };
            let Some(tag) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let content = std::fs::read_to_string(&path)?;
            let nodes = format.parse(&content).map_err(|message| LocaleError::ParseError {
                file: path.display().to_string(),
                message,
            })?;

            tracing::debug!("Loaded locale '{}' with {} nodes", tag, nodes.len());
            loaded.insert(normalize_tag(tag), nodes);
        }

        let default_tag = normalize_tag(&self.config.default_locale);
        if !loaded.contains_key(&default_tag) {
            tracing::warn!(
                "Default locale '{}' not found in {}",
                default_tag,
                directory.display()
            );
        }

        let count = loaded.len();
        *self.locales.write() = loaded;
        tracing::info!("Loaded {} locale(s) from {}", count, directory.display());

        Ok(count)
    }

    /// Add or replace a locale from already parsed nodes.
    pub fn insert_locale(&self, tag: &str, nodes: Nodes) {
        self.locales.write().insert(normalize_tag(tag), nodes);
    }

    /// Add or replace a locale from file contents.
    pub fn load_locale_str(&self, tag: &str, content: &str, format: LocaleFormat) -> Result<usize> {
        let nodes = format.parse(content).map_err(|message| LocaleError::ParseError {
            file: tag.to_owned(),
            message,
        })?;
        let count = nodes.len();
        self.insert_locale(tag, nodes);
        Ok(count)
    }

    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    pub fn default_locale(&self) -> &str {
        &self.config.default_locale
    }

    /// Loaded locale tags in alphabetical order
    pub fn locales(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.locales.read().keys().cloned().collect();
        tags.sort_unstable();
        tags
    }

    pub fn has_locale(&self, tag: &str) -> bool {
        self.locales.read().contains_key(&normalize_tag(tag))
    }

    /// Raw text of `node` in the default locale.
    pub fn get_raw(&self, node: &str) -> Option<String> {
        self.get_raw_in(&self.config.default_locale, node)
    }

    /// Raw text of `node` in `locale`, falling back to the default locale.
    pub fn get_raw_in(&self, locale: &str, node: &str) -> Option<String> {
        let locales = self.locales.read();
        locales
            .get(&normalize_tag(locale))
            .and_then(|nodes| nodes.get(node))
            .or_else(|| {
                locales
                    .get(&normalize_tag(&self.config.default_locale))
                    .and_then(|nodes| nodes.get(node))
            })
            .cloned()
    }

    /// Translate `node` in the default locale, colors included.
    pub fn translate(&self, node: &str, variables: &Variables) -> Result<String> {
        self.translate_in(&self.config.default_locale, node, variables)
    }

    /// Translate `node` in `locale`, colors included.
    pub fn translate_in(&self, locale: &str, node: &str, variables: &Variables) -> Result<String> {
        let text = self.translate_no_color_in(locale, node, variables)?;
        Ok(translate_colors(&self.config.color_marker, &text))
    }

    /// Translate `node` in the default locale without the color pass.
    pub fn translate_no_color(&self, node: &str, variables: &Variables) -> Result<String> {
        self.translate_no_color_in(&self.config.default_locale, node, variables)
    }

    fn translate_no_color_in(
        &self,
        locale: &str,
        node: &str,
        variables: &Variables,
    ) -> Result<String> {
        let raw = self
            .get_raw_in(locale, node)
            .ok_or_else(|| LocaleError::MissingNode(node.to_owned()))?;
        let lookup = |name: &str| self.get_raw_in(locale, name);
        self.interpolator.interpolate(&raw, &lookup, variables)
    }

    /// Render an arbitrary message against the default locale's nodes.
    pub fn render(&self, message: &str, variables: &Variables) -> Result<String> {
        let text = self.interpolator.interpolate(message, self, variables)?;
        Ok(translate_colors(&self.config.color_marker, &text))
    }
}

impl NodeLookup for LocaleProvider {
    fn lookup(&self, node: &str) -> Option<String> {
        self.get_raw(node)
    }
}

impl std::fmt::Debug for LocaleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleProvider")
            .field("config", &self.config)
            .field("locales", &self.locales())
            .finish()
    }
}
