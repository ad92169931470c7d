//! Events command: the raw log in stored order.

use std::io::Write;

use anyhow::Result;
use cs_core::RawEvent;
use cs_db::Database;

/// Prints every event, newest last. JSON output uses the import format.
pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let events = db.load_events()?;

    if json {
        let raw: Vec<RawEvent> = events.into_iter().map(RawEvent::from).collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&raw)?)?;
        return Ok(());
    }

    if events.is_empty() {
        writeln!(writer, "No events recorded.")?;
        return Ok(());
    }

    for (position, event) in events.iter().enumerate() {
        writeln!(writer, "{position:<4} {:<5} {}", event.kind, event.time_iso())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use cs_core::{Event, parse_event_log};
    use insta::assert_snapshot;

    fn seeded() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        let t = Utc.with_ymd_and_hms(2024, 5, 5, 10, 0, 0).unwrap();
        db.save_events(&[Event::start(t), Event::stop(t + chrono::Duration::seconds(3))])
            .unwrap();
        db
    }

    #[test]
    fn plain_listing() {
        let mut output = Vec::new();
        run(&mut output, &seeded(), false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        0    start 2024-05-05T10:00:00.000Z
        1    stop  2024-05-05T10:00:03.000Z
        ");
    }

    #[test]
    fn json_listing_reimports() {
        let db = seeded();
        let mut output = Vec::new();
        run(&mut output, &db, true).unwrap();
        let reparsed = parse_event_log(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(reparsed, db.load_events().unwrap());
    }
}
