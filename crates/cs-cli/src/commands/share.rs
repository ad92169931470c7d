//! Share commands: emit the start/stop lists for a log, and render a
//! received pair of lists as sessions.

use std::io::Write;

use anyhow::Result;
use cs_core::{ShareError, SharePayload, derive_sessions, format_elapsed};
use cs_db::Database;

/// Prints the share payload for the stored log as JSON.
pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let events = db.load_events()?;
    if events.is_empty() {
        writeln!(writer, "Nothing to share yet.")?;
        return Ok(());
    }

    let payload = SharePayload::from_events(&events);
    writeln!(writer, "{}", serde_json::to_string_pretty(&payload)?)?;
    Ok(())
}

/// Decodes a received payload and prints its log and sessions.
///
/// Invalid payloads produce a readable "invalid link" message rather than an error exit,
/// so a bad link never looks like a crash.
pub fn view<W: Write>(writer: &mut W, start: Option<&str>, stop: Option<&str>) -> Result<()> {
    let decoded = SharePayload::from_json_params(start, stop).and_then(|payload| {
        let balanced = payload.is_balanced();
        payload.into_events().map(|events| (events, balanced))
    });

    let (events, balanced) = match decoded {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!(error = %err, "failed to decode shared data");
            writeln!(writer, "Invalid link: {}", describe(&err))?;
            return Ok(());
        }
    };

    if !balanced {
        writeln!(
            writer,
            "Warning: start and stop counts differ; some events will not pair."
        )?;
    }

    writeln!(writer, "Shared timer ({} events)", events.len())?;
    for event in &events {
        writeln!(writer, "  {:<5} {}", event.kind, event.time_iso())?;
    }
    for (index, session) in derive_sessions(&events).iter().enumerate() {
        writeln!(
            writer,
            "Session {index}: {}",
            format_elapsed(session.duration_seconds)
        )?;
    }
    Ok(())
}

fn describe(err: &ShareError) -> &'static str {
    match err {
        ShareError::Missing(_) => "shared data is missing or incomplete.",
        ShareError::Malformed { .. } | ShareError::Validation(_) => {
            "could not read the shared data; it may be corrupted."
        }
    }
}
