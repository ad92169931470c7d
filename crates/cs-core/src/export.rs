//! Text renderings of sessions and raw events for external sinks.
//!
//! These are pure formatters: they render exactly what they are given,
//! without filtering or reordering.

use std::fmt;
use std::str::FromStr;

use chrono::SecondsFormat;
use serde::{Serialize, Serializer};

use crate::event::Event;
use crate::session::Session;

/// Column header for session CSV output.
pub const SESSION_CSV_HEADER: &str = "start_datetime,duration_seconds";

/// Column header for raw event CSV output.
pub const EVENT_CSV_HEADER: &str = "type,time";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid export format: {s}")),
        }
    }
}

/// One exported session, in the external interchange shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRow {
    /// ISO 8601 UTC with milliseconds, e.g. `2024-01-01T00:00:00.000Z`.
    pub start_datetime: String,
    #[serde(serialize_with = "serialize_seconds")]
    pub duration_seconds: f64,
}

impl From<&Session> for SessionRow {
    fn from(session: &Session) -> Self {
        Self {
            start_datetime: session
                .start_time
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            duration_seconds: session.duration_seconds,
        }
    }
}

/// Writes whole numbers without a fractional part (`5`, not `5.0`).
#[allow(clippy::trivially_copy_pass_by_ref, clippy::cast_possible_truncation)]
fn serialize_seconds<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this f64 cannot hold every integer.
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < EXACT_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Renders sessions as CSV: a header plus one row per session, no trailing newline.
pub fn sessions_to_csv(sessions: &[Session]) -> String {
    let mut lines = Vec::with_capacity(sessions.len() + 1);
    lines.push(SESSION_CSV_HEADER.to_string());
    lines.extend(sessions.iter().map(|session| {
        let row = SessionRow::from(session);
        format!("\"{}\",{}", row.start_datetime, row.duration_seconds)
    }));
    lines.join("\n")
}

/// Renders sessions as a pretty-printed JSON array.
pub fn sessions_to_json(sessions: &[Session]) -> serde_json::Result<String> {
    let rows: Vec<SessionRow> = sessions.iter().map(SessionRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

/// Renders raw events as CSV in log order, no trailing newline.
pub fn events_to_csv(events: &[Event]) -> String {
    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(EVENT_CSV_HEADER.to_string());
    lines.extend(
        events
            .iter()
            .map(|event| format!("{},\"{}\"", event.kind, event.time_iso())),
    );
    lines.join("\n")
}
