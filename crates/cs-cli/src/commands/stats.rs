//! Stats command: rolling averages over a trailing window.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use cs_core::{AnalyticsWindow, WindowSummary, format_elapsed};
use cs_db::Database;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    now: DateTime<Utc>,
    window_minutes: i64,
    json: bool,
) -> Result<()> {
    if window_minutes <= 0 {
        bail!("window must be a positive number of minutes, got {window_minutes}");
    }

    let events = db.load_events()?;
    let summary = WindowSummary::compute(&events, now, AnalyticsWindow::from_minutes(window_minutes));
    tracing::debug!(?summary, "computed window summary");

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    writeln!(writer, "Last {window_minutes} minutes (until {})", now.to_rfc3339())?;
    writeln!(writer, "Sessions:                 {}", summary.session_count)?;
    writeln!(
        writer,
        "Avg. duration:            {}",
        format_elapsed(summary.average_duration_seconds)
    )?;
    writeln!(
        writer,
        "Avg. time between starts: {}",
        format_elapsed(summary.average_start_gap_seconds)
    )?;
    Ok(())
}
