//! Reset command: clears the event log.

use std::io::Write;

use anyhow::Result;
use cs_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let removed = db.reset()?;
    writeln!(writer, "Removed {removed} events.")?;
    Ok(())
}
