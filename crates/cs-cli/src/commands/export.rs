//! Implementation of the `cs export` command.
//!
//! Renders the derived sessions (or the raw log) as CSV or JSON on stdout
//! for piping into a clipboard tool or file.

use std::io::Write;

use anyhow::{Context, Result, bail};
use cs_core::{ExportFormat, derive_sessions, events_to_csv, sessions_to_csv, sessions_to_json};
use cs_db::Database;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    format: ExportFormat,
    raw_events: bool,
) -> Result<()> {
    let events = db.load_events()?;

    let rendered = match (format, raw_events) {
        (ExportFormat::Csv, true) => events_to_csv(&events),
        (ExportFormat::Json, true) => bail!("raw event export only supports csv; use `cs events --json`"),
        (ExportFormat::Csv, false) => sessions_to_csv(&derive_sessions(&events)),
        (ExportFormat::Json, false) => sessions_to_json(&derive_sessions(&events))
            .context("failed to serialize sessions")?,
    };

    tracing::debug!(%format, raw_events, bytes = rendered.len(), "exporting");
    writeln!(writer, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use cs_core::Event;
    use insta::assert_snapshot;

    fn ts(millis: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::milliseconds(millis)
    }

    fn seeded() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.save_events(&[
            Event::start(ts(0)),
            Event::stop(ts(5_000)),
            Event::start(ts(60_000)),
            Event::stop(ts(62_500)),
            Event::start(ts(90_000)),
        ])
        .unwrap();
        db
    }

    fn render(format: ExportFormat, raw_events: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, &seeded(), format, raw_events).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn csv_sessions() {
        assert_snapshot!(render(ExportFormat::Csv, false), @r#"
        start_datetime,duration_seconds
        "2024-01-01T00:00:00.000Z",5
        "2024-01-01T00:01:00.000Z",2.5
        "#);
    }

    #[test]
    fn json_sessions() {
        assert_snapshot!(render(ExportFormat::Json, false), @r#"
        [
          {
            "start_datetime": "2024-01-01T00:00:00.000Z",
            "duration_seconds": 5
          },
          {
            "start_datetime": "2024-01-01T00:01:00.000Z",
            "duration_seconds": 2.5
          }
        ]
        "#);
    }

    #[test]
    fn csv_raw_events() {
        assert_snapshot!(render(ExportFormat::Csv, true), @r#"
        type,time
        start,"2024-01-01T00:00:00.000Z"
        stop,"2024-01-01T00:00:05.000Z"
        start,"2024-01-01T00:01:00.000Z"
        stop,"2024-01-01T00:01:02.500Z"
        start,"2024-01-01T00:01:30.000Z"
        "#);
    }

    #[test]
    fn json_raw_events_is_rejected() {
        let err = run(&mut Vec::new(), &seeded(), ExportFormat::Json, true).unwrap_err();
        assert!(err.to_string().contains("only supports csv"));
    }
}
