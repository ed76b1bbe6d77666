//! Locale and placeholder support for StickyAPI
//!
//! Messages are stored as locale nodes and rendered by substituting
//! `{variable}` and `{variable|function:"argument"}` placeholders, then
//! translating `&`-style color markers into Minecraft format codes.

#![warn(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::manual_let_else,
    clippy::redundant_closure_for_method_calls
)]

pub mod color;
pub mod config;
pub mod error;
pub mod functions;
pub mod placeholder;
pub mod provider;
pub mod variables;

// Re-export commonly used types
pub use color::{strip_colors, translate_colors, COLOR_CHAR, DEFAULT_COLOR_MARKER};
pub use config::LocaleConfig;
pub use error::{LocaleError, Result};
pub use functions::{FunctionRegistry, PlaceholderFn};
pub use placeholder::{tokenize, Interpolator, NoNodes, NodeLookup, Token};
pub use provider::{LocaleFormat, LocaleProvider, Nodes};
pub use variables::Variables;
