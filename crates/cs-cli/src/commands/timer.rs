//! Start, stop, and toggle commands.
//!
//! Each command loads the log, checks the pairing state, and appends one event.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use cs_core::{Event, format_elapsed, pending_start, seconds_between};
use cs_db::Database;

/// Appends a start event. Fails if a start is already pending.
pub fn start<W: Write>(writer: &mut W, db: &Database, at: DateTime<Utc>) -> Result<()> {
    let events = db.load_events()?;
    if let Some(open) = pending_start(&events) {
        bail!("stopwatch already running since {}", open.time_iso());
    }

    let event = Event::start(at);
    db.append_event(&event)?;
    tracing::debug!(time = %event.time_iso(), "recorded start");
    writeln!(writer, "Started at {}", event.time_iso())?;
    Ok(())
}

/// Appends a stop event. Fails if no start is pending.
pub fn stop<W: Write>(writer: &mut W, db: &Database, at: DateTime<Utc>) -> Result<()> {
    let events = db.load_events()?;
    let Some(open) = pending_start(&events).copied() else {
        bail!("stopwatch is not running");
    };
    if at < open.time {
        tracing::warn!(
            start = %open.time_iso(),
            stop = %at,
            "stop precedes start; session will have a negative duration"
        );
    }

    let event = Event::stop(at);
    db.append_event(&event)?;
    tracing::debug!(time = %event.time_iso(), "recorded stop");
    writeln!(
        writer,
        "Stopped at {} (session {})",
        event.time_iso(),
        format_elapsed(seconds_between(open.time, at))
    )?;
    Ok(())
}

/// Stops if running, otherwise starts.
pub fn toggle<W: Write>(writer: &mut W, db: &Database, now: DateTime<Utc>) -> Result<()> {
    let running = pending_start(&db.load_events()?).is_some();
    if running {
        stop(writer, db, now)
    } else {
        start(writer, db, now)
    }
}
