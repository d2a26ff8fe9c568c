//! Stockval CLI - command-line front end for the valuation engine.
//!
//! Commands:
//! - `analyze`: analyze values given as flags
//! - `metric`: evaluate one metric
//! - `sample`: analyze a built-in data set
//! - `interactive`: prompt for values on stdin

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod commands;
pub mod prompt;
pub mod report;
pub mod samples;

pub use commands::{execute, resolve_config, Cli, Commands};
