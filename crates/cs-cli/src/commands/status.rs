//! Status command for showing whether the stopwatch is running.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use cs_core::{EventKind, derive_sessions, format_elapsed, pending_start, seconds_between};
use cs_db::Database;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    database_path: &Path,
    now: DateTime<Utc>,
) -> Result<()> {
    let events = db.load_events()?;

    writeln!(writer, "Stopwatch status")?;
    writeln!(writer, "Database: {}", database_path.display())?;

    if events.is_empty() {
        writeln!(writer, "No events recorded.")?;
        return Ok(());
    }

    match pending_start(&events) {
        Some(open) => writeln!(
            writer,
            "Running since {} ({})",
            open.time_iso(),
            format_elapsed(seconds_between(open.time, now))
        )?,
        None => writeln!(writer, "Stopped.")?,
    }

    writeln!(writer, "Sessions: {}", derive_sessions(&events).len())?;
    if let Some(last_stop) = db.last_event_time(EventKind::Stop)? {
        writeln!(writer, "Last stop: {}", last_stop.to_rfc3339())?;
    }

    Ok(())
}
