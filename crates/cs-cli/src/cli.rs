//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cs_core::ExportFormat;

/// Simple, persistent, shareable stopwatch.
///
/// Records start/stop events and derives sessions, idle gaps, and
/// rolling averages from them.
#[derive(Debug, Parser)]
#[command(name = "cs", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the stopwatch.
    Start {
        /// When the start happened (ISO 8601 or e.g. "5 minutes ago"). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Stop the running stopwatch.
    Stop {
        /// When the stop happened (ISO 8601 or e.g. "5 minutes ago"). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Start if stopped, stop if running.
    Toggle,

    /// Show whether the stopwatch is running.
    Status,

    /// List completed sessions with idle gaps.
    Sessions {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List raw start/stop events in log order.
    Events {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete a session (its start and stop) by index.
    Delete {
        /// Zero-based session index, as shown by `cs sessions`.
        index: usize,
    },

    /// Clear the entire event log.
    Reset,

    /// Rolling averages over a trailing window.
    Stats {
        /// End of the window (ISO 8601 or relative). Defaults to now.
        #[arg(long)]
        now: Option<String>,

        /// Window length in minutes. Defaults to the configured value.
        #[arg(long)]
        window_minutes: Option<i64>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export sessions (or raw events) to stdout.
    Export {
        /// Output format.
        #[arg(long, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Export raw events instead of sessions (CSV only).
        #[arg(long)]
        events: bool,
    },

    /// Print the share payload (start and stop lists) for the current log.
    Share,

    /// Show sessions decoded from a share payload.
    ViewShare {
        /// JSON array of start timestamps.
        #[arg(long)]
        start: Option<String>,

        /// JSON array of stop timestamps.
        #[arg(long)]
        stop: Option<String>,
    },

    /// Replace the event log with a JSON array of events from a file.
    Import {
        /// Path to a JSON file like `[{"type": "start", "time": "..."}]`.
        path: PathBuf,
    },
}
