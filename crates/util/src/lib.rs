//! Shared helpers for StickyAPI
//!
//! Small parsing and formatting routines used by both the locale and the
//! command crates: numeric predicates, boolean parsing, duration
//! expressions and human readable time strings.

#![warn(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::manual_let_else,
    clippy::redundant_closure_for_method_calls
)]

pub mod number;
pub mod time;

pub use number::{is_numeric, parse_bool};
pub use time::{
    duration_string, parse_duration, parse_time_string, parse_timestamp, relative_time,
    MAX_TIMESTAMP_MILLIS,
};
