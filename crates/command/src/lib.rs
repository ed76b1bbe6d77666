//! Command argument parsing for StickyAPI
//!
//! [`Arguments`] extracts named, typed fields from the tokens of a command,
//! and [`command_variables`] builds the placeholder variables every command
//! message can use.

#![warn(clippy::expect_used, clippy::unwrap_used)]

pub mod arguments;
pub mod variables;

pub use arguments::Arguments;
pub use variables::{command_variables, Sender};
