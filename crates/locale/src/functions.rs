//! Named placeholder functions
//!
//! A placeholder such as `{count|pluralize:"item,items"}` applies the
//! `pluralize` function to the resolved value of `count`. Functions receive
//! the resolved value (which may be null) and the quoted argument, or an
//! empty string when no argument was given.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use util::{duration_string, parse_bool, parse_timestamp, relative_time};

/// Signature shared by every placeholder function
pub type PlaceholderFn = dyn Fn(Option<&str>, &str) -> String + Send + Sync;

/// Default pattern for `datetime` when no argument is supplied
pub const DEFAULT_DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

const NEVER: &str = "Never";
const NEVER_EXPIRES: &str = "never expires";

/// Case-insensitive table of placeholder functions.
///
/// Build it once at startup, register any custom functions, then share it
/// behind an [`Arc`]; it is never mutated afterwards.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<PlaceholderFn>>,
}

impl FunctionRegistry {
    /// Create a registry with no functions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in functions
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("pluralize", pluralize)
            .register("yesno", yesno)
            .register("datetime", datetime)
            .register("duration", duration)
            .register("expiry", |value, arg| expiry(value, arg, Utc::now()))
            .register("cut", cut)
            .register("empty_if_false", empty_if_false)
            .register("empty_if_true", empty_if_true)
            .register("default_if_none", default_if_none)
            .register("lower", lower)
            .register("upper", upper);
        registry
    }

    /// Register a function, replacing any existing one with the same name.
    pub fn register<F>(&mut self, name: &str, function: F) -> &mut Self
    where
        F: Fn(Option<&str>, &str) -> String + Send + Sync + 'static,
    {
        self.functions
            .insert(name.to_lowercase(), Arc::new(function));
        self
    }

    /// Look up a function by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&PlaceholderFn> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    /// Apply the named function, or `None` if it is not registered.
    pub fn apply(&self, name: &str, value: Option<&str>, argument: &str) -> Option<String> {
        self.get(name).map(|function| function(value, argument))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    /// Registered names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    value.and_then(parse_bool).unwrap_or(false)
}

/// `"1"` selects the singular form, anything else the plural.
fn pluralize(value: Option<&str>, arg: &str) -> String {
    let (singular, plural) = match arg.split_once(',') {
        Some((singular, plural)) => (singular, plural),
        None if arg.is_empty() => ("", "s"),
        None => ("", arg),
    };

    if value == Some("1") {
        singular.to_owned()
    } else {
        plural.to_owned()
    }
}

fn yesno(value: Option<&str>, arg: &str) -> String {
    let truthy = is_truthy(value);
    match arg.split_once(',') {
        Some((yes, no)) => (if truthy { yes } else { no }).to_owned(),
        None if truthy && !arg.is_empty() => arg.to_owned(),
        None if truthy => "yes".to_owned(),
        None => "no".to_owned(),
    }
}

fn datetime(value: Option<&str>, arg: &str) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return NEVER.to_owned();
    };
    let Some(timestamp) = parse_timestamp(raw) else {
        return raw.to_owned();
    };

    let pattern = if arg.is_empty() {
        DEFAULT_DATETIME_PATTERN
    } else {
        arg
    };

    // Malformed patterns make `Display` fail, so write! instead of to_string().
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(pattern)).is_err() {
        return raw.to_owned();
    }
    out
}

fn duration(value: Option<&str>, _arg: &str) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return NEVER.to_owned();
    };
    match raw.trim().parse::<u64>() {
        Ok(millis) => duration_string(Duration::from_millis(millis)),
        Err(_) => raw.to_owned(),
    }
}

fn expiry(value: Option<&str>, _arg: &str, now: DateTime<Utc>) -> String {
    let raw = match value.map(str::trim) {
        None | Some("") | Some("0") => return NEVER_EXPIRES.to_owned(),
        Some(raw) => raw,
    };
    match parse_timestamp(raw) {
        Some(timestamp) => relative_time(timestamp, now),
        None => raw.to_owned(),
    }
}

fn cut(value: Option<&str>, arg: &str) -> String {
    let value = value.unwrap_or_default();
    if arg.is_empty() {
        return value.to_owned();
    }
    value.replace(arg, "")
}

fn empty_if_false(value: Option<&str>, arg: &str) -> String {
    if is_truthy(value) {
        arg.to_owned()
    } else {
        String::new()
    }
}

fn empty_if_true(value: Option<&str>, arg: &str) -> String {
    if is_truthy(value) {
        String::new()
    } else {
        arg.to_owned()
    }
}

fn default_if_none(value: Option<&str>, arg: &str) -> String {
    value.unwrap_or(arg).to_owned()
}

fn lower(value: Option<&str>, _arg: &str) -> String {
    value.unwrap_or_default().to_lowercase()
}

fn upper(value: Option<&str>, _arg: &str) -> String {
    value.unwrap_or_default().to_uppercase()
}
