//! Typed start/stop events and the validated boundary into the engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ValidationError, parse_instant};

/// The two actions a stopwatch can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Stop,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            _ => Err(ValidationError::UnknownEventKind {
                value: s.to_string(),
            }),
        }
    }
}

/// A single timestamped stopwatch action.
///
/// The log order defines chronological order; the engine never re-sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub time: DateTime<Utc>,
}

impl Event {
    pub const fn new(kind: EventKind, time: DateTime<Utc>) -> Self {
        Self { kind, time }
    }

    pub const fn start(time: DateTime<Utc>) -> Self {
        Self::new(EventKind::Start, time)
    }

    pub const fn stop(time: DateTime<Utc>) -> Self {
        Self::new(EventKind::Stop, time)
    }

    pub const fn is_start(&self) -> bool {
        matches!(self.kind, EventKind::Start)
    }

    pub const fn is_stop(&self) -> bool {
        matches!(self.kind, EventKind::Stop)
    }

    /// ISO 8601 rendering with millisecond precision and a `Z` suffix.
    pub fn time_iso(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// An event as it arrives from outside: both fields still untrusted strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

impl TryFrom<RawEvent> for Event {
    type Error = ValidationError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let kind = raw.kind.parse()?;
        let time = parse_instant(&raw.time)?;
        Ok(Self { kind, time })
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        Self {
            kind: event.kind.to_string(),
            time: event.time_iso(),
        }
    }
}

/// Parses a JSON array of events, rejecting the whole log if any entry is invalid.
pub fn parse_event_log(json: &str) -> Result<Vec<Event>, ValidationError> {
    let raw: Vec<RawEvent> =
        serde_json::from_str(json).map_err(|e| ValidationError::MalformedLog {
            message: e.to_string(),
        })?;
    raw.into_iter().map(Event::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn event_serializes_in_log_format() {
        let event = Event::start(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"start","time":"2024-01-01T00:00:00Z"}"#);
    }

    #[test]
    fn event_kind_roundtrip() {
        for kind in [EventKind::Start, EventKind::Stop] {
            let parsed: EventKind = kind.to_string().parse().expect("should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_kind_errors() {
        let err = "pause".parse::<EventKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event type: pause");
    }

    #[test]
    fn raw_event_with_bad_time_is_rejected() {
        let raw = RawEvent {
            kind: "stop".into(),
            time: "not a time".into(),
        };
        assert_eq!(
            Event::try_from(raw),
            Err(ValidationError::InvalidTimestamp {
                value: "not a time".into()
            })
        );
    }

    #[test]
    fn parse_event_log_accepts_stored_format() {
        let json = r#"[
            {"type": "start", "time": "2024-01-01T00:00:00.000Z"},
            {"type": "stop", "time": "2024-01-01T00:00:05.250Z"}
        ]"#;
        let events = parse_event_log(json).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_start());
        assert!(events[1].is_stop());
        assert_eq!(events[1].time_iso(), "2024-01-01T00:00:05.250Z");
    }

    #[test]
    fn parse_event_log_rejects_whole_log_on_one_bad_entry() {
        let json = r#"[
            {"type": "start", "time": "2024-01-01T00:00:00Z"},
            {"type": "stop", "time": "2024-13-45T00:00:00Z"}
        ]"#;
        assert!(matches!(
            parse_event_log(json),
            Err(ValidationError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn parse_event_log_rejects_non_array() {
        assert!(matches!(
            parse_event_log(r#"{"type": "start"}"#),
            Err(ValidationError::MalformedLog { .. })
        ));
    }
}
