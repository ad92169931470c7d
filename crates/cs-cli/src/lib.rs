//! Stopwatch CLI library.
//!
//! This crate provides the CLI interface around the `cs-core` engine. Every
//! command follows the same shape: load the log, compute, save the replacement.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
