//! Sessions command: derived sessions with idle gaps.

use std::io::Write;

use anyhow::Result;
use chrono::SecondsFormat;
use cs_core::{SessionWithIdle, derive_sessions, format_elapsed, with_idle_gaps};
use cs_db::Database;
use serde::Serialize;

use super::util::format_seconds;

/// One row of `cs sessions --json`.
#[derive(Debug, Serialize)]
struct SessionEntry {
    index: usize,
    start_datetime: String,
    duration_seconds: f64,
    idle_seconds: Option<f64>,
}

impl SessionEntry {
    fn new(index: usize, item: &SessionWithIdle) -> Self {
        Self {
            index,
            start_datetime: item
                .session
                .start_time
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            duration_seconds: item.session.duration_seconds,
            idle_seconds: item.idle_seconds,
        }
    }
}

pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let events = db.load_events()?;
    let entries: Vec<SessionEntry> = with_idle_gaps(&derive_sessions(&events))
        .iter()
        .enumerate()
        .map(|(index, item)| SessionEntry::new(index, item))
        .collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "No sessions recorded.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<3}  {:<24}  {:>12}  {:>12}",
        "#", "START", "DURATION", "IDLE"
    )?;
    for entry in &entries {
        writeln!(
            writer,
            "{:<3}  {:<24}  {:>12}  {:>12}",
            entry.index,
            entry.start_datetime,
            describe(Some(entry.duration_seconds)),
            describe(entry.idle_seconds),
        )?;
    }
    Ok(())
}

/// Stopwatch format for non-negative spans; raw seconds otherwise.
fn describe(seconds: Option<f64>) -> String {
    match seconds {
        None => "-".to_string(),
        Some(s) if s < 0.0 => format_seconds(s),
        Some(s) => format_elapsed(s),
    }
}
