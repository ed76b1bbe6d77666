//! Placeholder interpolation
//!
//! Messages contain tokens of the form `{name}`, `{name|function}` or
//! `{name|function:"argument"}`. Every token is located up front, then each
//! one is resolved in order and the message is reassembled around them.
//!
//! # Resolution
//!
//! 1. A name present in the [`Variables`] map resolves to its value, taken
//!    literally.
//! 2. Otherwise the name is looked up as a locale node through
//!    [`NodeLookup`]; the node text is itself interpolated against the same
//!    variables, so nodes can reference other nodes.
//! 3. A named function, if any, is applied to the resolved value.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Malformed token | No closing brace, nested braces | Left as literal text |
//! | Unresolved name | Not a variable, not a node | Token left as-is (functions still run with a null value) |
//! | Unknown function | Name not in the registry | [`LocaleError::UnknownFunction`] |
//! | Self-referencing nodes | `a` -> `{b}` -> `{a}` | [`LocaleError::RecursionLimit`] |

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LocaleError, Result};
use crate::functions::FunctionRegistry;
use crate::variables::Variables;

#[allow(clippy::expect_used)]
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{([^{}|]+?)(?:\|([^{}|:]+?)(?::"([^"]*)")?)?\}"#)
        .expect("placeholder pattern is valid")
});

/// Source of raw, untranslated node text.
pub trait NodeLookup {
    /// Raw text of `node`, or `None` if no such node exists.
    fn lookup(&self, node: &str) -> Option<String>;
}

impl<F> NodeLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, node: &str) -> Option<String> {
        self(node)
    }
}

impl NodeLookup for HashMap<String, String> {
    fn lookup(&self, node: &str) -> Option<String> {
        self.get(node).cloned()
    }
}

/// A lookup that knows no nodes, for messages that only use variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNodes;

impl NodeLookup for NoNodes {
    fn lookup(&self, _node: &str) -> Option<String> {
        None
    }
}

/// One placeholder occurrence inside a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Byte offset of the opening brace
    pub start: usize,
    /// Byte offset just past the closing brace
    pub end: usize,
    /// The whole token, braces included
    pub text: &'a str,
    pub name: &'a str,
    pub function: Option<&'a str>,
    pub argument: Option<&'a str>,
}

/// Find every placeholder token in `message`, left to right.
pub fn tokenize(message: &str) -> Vec<Token<'_>> {
    TOKEN_PATTERN
        .captures_iter(message)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let name = captures.get(1)?;
            Some(Token {
                start: whole.start(),
                end: whole.end(),
                text: whole.as_str(),
                name: name.as_str(),
                function: captures.get(2).map(|m| m.as_str()),
                argument: captures.get(3).map(|m| m.as_str()),
            })
        })
        .collect()
}

/// Resolves placeholders against variables, locale nodes and the function registry.
#[derive(Debug, Clone)]
pub struct Interpolator {
    functions: Arc<FunctionRegistry>,
    max_depth: usize,
}

impl Interpolator {
    /// Node nesting allowed before resolution is abandoned.
    pub const DEFAULT_MAX_DEPTH: usize = 16;

    pub fn new(functions: Arc<FunctionRegistry>) -> Self {
        Self {
            functions,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set how deeply nodes may reference other nodes.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Substitute every placeholder in `message`.
    ///
    /// A message without placeholders is returned unchanged.
    pub fn interpolate<L>(&self, message: &str, lookup: &L, variables: &Variables) -> Result<String>
    where
        L: NodeLookup + ?Sized,
    {
        self.interpolate_at(message, lookup, variables, 0)
    }

    fn interpolate_at<L>(
        &self,
        message: &str,
        lookup: &L,
        variables: &Variables,
        depth: usize,
    ) -> Result<String>
    where
        L: NodeLookup + ?Sized,
    {
        let tokens = tokenize(message);
        if tokens.is_empty() {
            return Ok(message.to_owned());
        }

        let mut out = String::with_capacity(message.len());
        let mut cursor = 0;

        for token in &tokens {
            out.push_str(&message[cursor..token.start]);

            let value = self.resolve(token.name, lookup, variables, depth)?;
            match token.function {
                Some(name) => {
                    let function = self
                        .functions
                        .get(name)
                        .ok_or_else(|| LocaleError::UnknownFunction(name.to_owned()))?;
                    out.push_str(&function(value.as_deref(), token.argument.unwrap_or("")));
                }
                None => match value {
                    Some(value) => out.push_str(&value),
                    None => {
                        tracing::trace!("Placeholder '{}' did not resolve", token.name);
                        out.push_str(token.text);
                    }
                },
            }

            cursor = token.end;
        }

        out.push_str(&message[cursor..]);
        Ok(out)
    }

    fn resolve<L>(
        &self,
        name: &str,
        lookup: &L,
        variables: &Variables,
        depth: usize,
    ) -> Result<Option<String>>
    where
        L: NodeLookup + ?Sized,
    {
        if let Some(value) = variables.get(name) {
            return Ok(value.map(str::to_owned));
        }

        let Some(raw) = lookup.lookup(name) else {
            return Ok(None);
        };

        if depth >= self.max_depth {
            tracing::warn!(
                "Placeholder recursion limit {} hit while resolving '{}'",
                self.max_depth,
                name
            );
            return Err(LocaleError::RecursionLimit {
                node: name.to_owned(),
                limit: self.max_depth,
            });
        }

        self.interpolate_at(&raw, lookup, variables, depth + 1)
            .map(Some)
    }
}
