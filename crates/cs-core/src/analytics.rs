//! Rolling-window analytics.
//!
//! Both averages consider only activity whose start falls strictly after
//! `now - window`. Everything is recomputed from the log on each call.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::event::Event;
use crate::session::derive_sessions;
use crate::types::seconds_between;

/// Trailing window ending at the moment of computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsWindow {
    /// Window length in seconds. Default: 3600 (one hour).
    pub seconds: i64,
}

impl Default for AnalyticsWindow {
    fn default() -> Self {
        Self { seconds: 3_600 }
    }
}

impl AnalyticsWindow {
    pub const fn from_minutes(minutes: i64) -> Self {
        Self {
            seconds: minutes.saturating_mul(60),
        }
    }

    /// Exclusive lower bound: anything starting at or before this is outside.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_seconds(self.seconds)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean duration of sessions started within the window; `0` when none qualify.
pub fn moving_average_duration(
    events: &[Event],
    now: DateTime<Utc>,
    window: AnalyticsWindow,
) -> f64 {
    let cutoff = window.cutoff(now);
    let durations: Vec<f64> = derive_sessions(events)
        .into_iter()
        .filter(|s| s.start_time > cutoff)
        .map(|s| s.duration_seconds)
        .collect();
    mean(&durations)
}

/// Mean gap between consecutive start events within the window.
///
/// Uses raw start events, paired or not, sorted by time. Returns `0` when
/// fewer than two starts qualify.
pub fn moving_average_start_gap(
    events: &[Event],
    now: DateTime<Utc>,
    window: AnalyticsWindow,
) -> f64 {
    let cutoff = window.cutoff(now);
    let mut starts: Vec<DateTime<Utc>> = events
        .iter()
        .filter(|e| e.is_start() && e.time > cutoff)
        .map(|e| e.time)
        .collect();
    if starts.len() < 2 {
        return 0.0;
    }
    starts.sort_unstable();

    let gaps: Vec<f64> = starts
        .windows(2)
        .map(|pair| seconds_between(pair[0], pair[1]))
        .collect();
    mean(&gaps)
}

/// Both rolling averages for one snapshot of the log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowSummary {
    pub window_seconds: i64,
    /// Completed sessions whose start falls inside the window.
    pub session_count: usize,
    pub average_duration_seconds: f64,
    pub average_start_gap_seconds: f64,
}

impl WindowSummary {
    pub fn compute(events: &[Event], now: DateTime<Utc>, window: AnalyticsWindow) -> Self {
        let cutoff = window.cutoff(now);
        let session_count = derive_sessions(events)
            .iter()
            .filter(|s| s.start_time > cutoff)
            .count();
        Self {
            window_seconds: window.seconds,
            session_count,
            average_duration_seconds: moving_average_duration(events, now, window),
            average_start_gap_seconds: moving_average_start_gap(events, now, window),
        }
    }
}
