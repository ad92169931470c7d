//! Delete command: removes one session's start and stop from the log.

use std::io::Write;

use anyhow::Result;
use cs_core::{delete_session, derive_sessions, format_elapsed};
use cs_db::Database;

/// Deletes session `index`. An index with no session leaves the log untouched.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, index: usize) -> Result<()> {
    let events = db.load_events()?;
    let Some(target) = derive_sessions(&events).get(index).copied() else {
        writeln!(writer, "No session at index {index}; nothing deleted.")?;
        return Ok(());
    };

    let updated = delete_session(&events, index);
    db.save_events(&updated)?;
    tracing::info!(index, removed = events.len() - updated.len(), "deleted session");

    writeln!(
        writer,
        "Deleted session {index} (started {}, {})",
        target.start_time.to_rfc3339(),
        format_elapsed(target.duration_seconds)
    )?;
    Ok(())
}
