//! Import command: replaces the stored log with events from a JSON file.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cs_core::parse_event_log;
use cs_db::Database;

/// Validates the whole file before touching the database; a file with any
/// bad entry leaves the stored log as it was.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let events = parse_event_log(&content)
        .with_context(|| format!("invalid event data in {}", path.display()))?;

    db.save_events(&events)?;
    writeln!(writer, "Imported {} events.", events.len())?;
    Ok(events.len())
}
