//! Positional argument parsing for commands
//!
//! An [`Arguments`] session wraps the tokens of one command invocation and
//! extracts named fields from them in declaration order:
//!
//! ```
//! use sticky_command::Arguments;
//!
//! let mut args = Arguments::parse_line("-s Steve 1d griefing near spawn");
//! args.optional_flag("silent", "-s")
//!     .required_string("player")
//!     .required_duration("duration")
//!     .optional_sentence("reason", Some("No reason given"), None);
//!
//! assert!(args.valid());
//! assert!(args.get_flag("silent"));
//! assert_eq!(args.get_string("player"), Some("Steve"));
//! assert_eq!(args.get_string("reason"), Some("griefing near spawn"));
//! ```
//!
//! # Consumption
//!
//! Flags are found anywhere in the working list and removed from it without
//! moving the cursor. That includes tokens the cursor has already passed, so
//! a token read by an earlier field can still be claimed by a later flag
//! search. Every other field reads the token at the cursor.
//! `optional_string` removes the token it takes; the other readers advance
//! the cursor past what they take.
//!
//! # Validity
//!
//! A failed `required_*` call marks the session invalid for good and records
//! the field name, unless an earlier field already failed. Tokens consumed
//! before the failure stay consumed. Optional fields never affect validity.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use locale::Variables;
use util::{is_numeric, parse_bool, parse_duration, parse_time_string, parse_timestamp};

/// Extraction state for a single command invocation.
#[derive(Debug, Clone)]
pub struct Arguments {
    /// Tokens as the command was invoked
    raw: Vec<String>,
    /// Tokens not yet removed by flag or optional-string extraction
    unparsed: Vec<String>,
    /// Index into `unparsed` of the next token to read
    position: usize,
    /// Extracted field values by name
    parsed: HashMap<String, String>,
    /// Fields extracted as flags
    flags: HashSet<String>,
    /// First required field that failed
    invalidated_by: Option<String>,
    /// Reference point for relative time strings
    now: DateTime<Utc>,
}

impl Arguments {
    /// Start a session over the given tokens.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            unparsed: raw.clone(),
            raw,
            position: 0,
            parsed: HashMap::new(),
            flags: HashSet::new(),
            invalidated_by: None,
            now: Utc::now(),
        }
    }

    /// Start a session over a whitespace separated command line.
    pub fn parse_line(line: &str) -> Self {
        Self::new(line.split_whitespace())
    }

    /// Use a fixed time as "now" for relative time strings.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn current(&self) -> Option<&str> {
        self.unparsed.get(self.position).map(String::as_str)
    }

    fn invalidate(&mut self, name: &str) {
        if self.invalidated_by.is_none() {
            tracing::debug!("Arguments invalidated by required field '{}'", name);
            self.invalidated_by = Some(name.to_owned());
        }
    }

    fn store(&mut self, name: &str, value: impl Into<String>) {
        self.flags.remove(name);
        self.parsed.insert(name.to_owned(), value.into());
    }

    /// Take the token at the cursor if `accept` maps it to a value, advancing past it.
    fn take_if<F>(&mut self, accept: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let value = accept(self.current()?)?;
        self.position += 1;
        Some(value)
    }

    fn take_flag(&mut self, flag: &str) -> Option<String> {
        let index = self.unparsed.iter().position(|arg| arg == flag)?;
        Some(self.unparsed.remove(index))
    }

    fn store_flag(&mut self, name: &str, value: String) {
        self.store(name, value);
        self.flags.insert(name.to_owned());
    }

    fn take_sentence(&mut self, length: Option<usize>) -> Option<String> {
        let available = self.unparsed.len().saturating_sub(self.position);
        let length = length.unwrap_or(available);
        if length == 0 || length > available {
            return None;
        }

        let end = self.position + length;
        let sentence = self.unparsed[self.position..end].join(" ");
        self.position = end;
        Some(sentence)
    }

    /// Record `name` if `flag` appears anywhere in the remaining tokens.
    pub fn optional_flag(&mut self, name: &str, flag: &str) -> &mut Self {
        if let Some(value) = self.take_flag(flag) {
            self.store_flag(name, value);
        }
        self
    }

    /// Like [`optional_flag`](Self::optional_flag), but a missing flag invalidates.
    pub fn required_flag(&mut self, name: &str, flag: &str) -> &mut Self {
        match self.take_flag(flag) {
            Some(value) => self.store_flag(name, value),
            None => self.invalidate(name),
        }
        self
    }

    /// Take and remove the token at the cursor, or store `fallback` if there is none.
    pub fn optional_string(&mut self, name: &str, fallback: Option<&str>) -> &mut Self {
        if self.position < self.unparsed.len() {
            let value = self.unparsed.remove(self.position);
            self.store(name, value);
        } else if let Some(fallback) = fallback {
            self.store(name, fallback);
        }
        self
    }

    /// Take the token at the cursor and advance.
    pub fn required_string(&mut self, name: &str) -> &mut Self {
        match self.take_if(|token| Some(token.to_owned())) {
            Some(value) => self.store(name, value),
            None => self.invalidate(name),
        }
        self
    }

    /// Join `length` tokens from the cursor with spaces.
    ///
    /// `None` takes every remaining token. If too few tokens remain, or
    /// `length` is zero, `fallback` is stored instead when given.
    pub fn optional_sentence(
        &mut self,
        name: &str,
        fallback: Option<&str>,
        length: Option<usize>,
    ) -> &mut Self {
        match self.take_sentence(length) {
            Some(sentence) => self.store(name, sentence),
            None => {
                if let Some(fallback) = fallback {
                    self.store(name, fallback);
                }
            }
        }
        self
    }

    /// Like [`optional_sentence`](Self::optional_sentence) without a fallback;
    /// too few tokens or a zero length invalidates.
    pub fn required_sentence(&mut self, name: &str, length: Option<usize>) -> &mut Self {
        match self.take_sentence(length) {
            Some(sentence) => self.store(name, sentence),
            None => self.invalidate(name),
        }
        self
    }

    /// Take the token at the cursor if it is all digits, else store `fallback`
    /// without consuming anything.
    pub fn optional_int(&mut self, name: &str, fallback: Option<i32>) -> &mut Self {
        match self.take_if(|token| is_numeric(token).then(|| token.to_owned())) {
            Some(value) => self.store(name, value),
            None => {
                if let Some(fallback) = fallback {
                    self.store(name, fallback.to_string());
                }
            }
        }
        self
    }

    pub fn required_int(&mut self, name: &str) -> &mut Self {
        match self.take_if(|token| is_numeric(token).then(|| token.to_owned())) {
            Some(value) => self.store(name, value),
            None => self.invalidate(name),
        }
        self
    }

    /// Take the token at the cursor if it is a duration expression such as `1w2d`.
    pub fn optional_duration(&mut self, name: &str) -> &mut Self {
        if let Some(value) = self.take_if(duration_token) {
            self.store(name, value);
        }
        self
    }

    pub fn required_duration(&mut self, name: &str) -> &mut Self {
        match self.take_if(duration_token) {
            Some(value) => self.store(name, value),
            None => self.invalidate(name),
        }
        self
    }

    /// Take the token at the cursor if it resolves to a point in time.
    ///
    /// Durations are added to the session's "now"; plain numbers are epoch
    /// milliseconds. The resolved epoch milliseconds are stored.
    pub fn optional_time_string(&mut self, name: &str) -> &mut Self {
        let now = self.now;
        if let Some(value) = self.take_if(|token| time_token(token, now)) {
            self.store(name, value);
        }
        self
    }

    pub fn required_time_string(&mut self, name: &str) -> &mut Self {
        let now = self.now;
        match self.take_if(|token| time_token(token, now)) {
            Some(value) => self.store(name, value),
            None => self.invalidate(name),
        }
        self
    }

    /// Whether every required field so far was satisfied.
    pub fn valid(&self) -> bool {
        self.invalidated_by.is_none()
    }

    /// The first required field that failed.
    pub fn invalidated_by(&self) -> Option<&str> {
        self.invalidated_by.as_deref()
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.parsed.get(name).map(String::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.get_string(name)?.parse().ok()
    }

    pub fn get_long(&self, name: &str) -> Option<i64> {
        self.get_string(name)?.parse().ok()
    }

    pub fn get_double(&self, name: &str) -> Option<f64> {
        self.get_string(name)?.parse().ok()
    }

    /// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`.
    pub fn get_boolean(&self, name: &str) -> Option<bool> {
        parse_bool(self.get_string(name)?)
    }

    pub fn get_duration(&self, name: &str) -> Option<Duration> {
        parse_duration(self.get_string(name)?)
    }

    pub fn get_timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        parse_timestamp(self.get_string(name)?)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.parsed.contains_key(name)
    }

    /// Whether the flag stored under `name` was present.
    pub fn get_flag(&self, name: &str) -> bool {
        self.exists(name)
    }

    /// Tokens exactly as the command was invoked
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// The working token list, including tokens behind the cursor
    pub fn unparsed(&self) -> &[String] {
        &self.unparsed
    }

    /// Tokens from the cursor onwards
    pub fn remaining(&self) -> &[String] {
        self.unparsed.get(self.position..).unwrap_or_default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of tokens the command was invoked with
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Extracted fields as placeholder variables, for use in messages.
    ///
    /// Flags that were present are `"true"`, so boolean placeholder
    /// functions such as `empty_if_false` see them as set.
    pub fn to_variables(&self) -> Variables {
        self.parsed
            .iter()
            .map(|(name, value)| {
                if self.flags.contains(name) {
                    (name.as_str(), "true")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect()
    }
}

fn duration_token(token: &str) -> Option<String> {
    parse_duration(token).map(|_| token.to_owned())
}

fn time_token(token: &str, now: DateTime<Utc>) -> Option<String> {
    parse_time_string(token, now).map(|time| time.timestamp_millis().to_string())
}
