//! Share payloads: a log flattened into parallel start and stop time lists.
//!
//! The receiving side re-zips the lists into typed events and sorts them by
//! time. The flattening is lossy when the lists differ in length or are not
//! chronologically consistent, so decoding reports problems as values rather
//! than failing hard.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{Event, EventKind};
use crate::types::{ValidationError, parse_instant};

/// Errors decoding a share payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// One of the two lists was absent or blank.
    #[error("shared data is missing the {0} list")]
    Missing(&'static str),

    /// A list was not a JSON array of strings.
    #[error("shared {list} list is malformed: {message}")]
    Malformed { list: &'static str, message: String },

    /// A timestamp in one of the lists could not be parsed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Start and stop times as ISO 8601 strings, in log order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub start: Vec<String>,
    pub stop: Vec<String>,
}

impl SharePayload {
    /// Splits a log into its start and stop time lists.
    pub fn from_events(events: &[Event]) -> Self {
        let mut payload = Self::default();
        for event in events {
            match event.kind {
                EventKind::Start => payload.start.push(event.time_iso()),
                EventKind::Stop => payload.stop.push(event.time_iso()),
            }
        }
        payload
    }

    /// Decodes the two JSON-array parameters of a share link.
    pub fn from_json_params(
        start: Option<&str>,
        stop: Option<&str>,
    ) -> Result<Self, ShareError> {
        Ok(Self {
            start: parse_list("start", start)?,
            stop: parse_list("stop", stop)?,
        })
    }

    /// Whether every start has a stop to pair with.
    pub fn is_balanced(&self) -> bool {
        self.start.len() == self.stop.len()
    }

    /// Rebuilds a log: typed events sorted by time, starts before stops on ties.
    pub fn into_events(self) -> Result<Vec<Event>, ShareError> {
        if !self.is_balanced() {
            tracing::warn!(
                starts = self.start.len(),
                stops = self.stop.len(),
                "share payload has unequal start and stop counts"
            );
        }

        let mut events = Vec::with_capacity(self.start.len() + self.stop.len());
        for time in &self.start {
            events.push(Event::start(parse_instant(time)?));
        }
        for time in &self.stop {
            events.push(Event::stop(parse_instant(time)?));
        }
        events.sort_by_key(|e| e.time);
        Ok(events)
    }
}

fn parse_list(list: &'static str, value: Option<&str>) -> Result<Vec<String>, ShareError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ShareError::Missing(list))?;
    serde_json::from_str(value).map_err(|e| ShareError::Malformed {
        list,
        message: e.to_string(),
    })
}
