//! Shared validation errors and time arithmetic.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation errors raised at the boundary where external data enters the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The event type was neither `start` nor `stop`.
    #[error("unknown event type: {value}")]
    UnknownEventKind { value: String },

    /// The timestamp could not be parsed as an absolute instant.
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    /// The event log was not a JSON array of events.
    #[error("malformed event log: {message}")]
    MalformedLog { message: String },
}

/// Parses an ISO 8601 / RFC 3339 timestamp into UTC.
pub(crate) fn parse_instant(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Returns `to - from` in fractional seconds.
///
/// Negative when `to` precedes `from`. Microsecond precision, falling back to
/// milliseconds for spans too large to count in microseconds.
#[allow(clippy::cast_precision_loss)]
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 1_000.0,
        |us| us as f64 / 1_000_000.0,
    )
}
