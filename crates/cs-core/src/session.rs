//! Session derivation from the event log.
//!
//! # Pairing
//!
//! Events are consumed left to right by a two-state machine:
//!
//! | state              | event | next state         | emits                  |
//! |--------------------|-------|--------------------|------------------------|
//! | `Idle`             | start | `Pending(start)`   | -                      |
//! | `Idle`             | stop  | `Idle`             | - (stop dropped)       |
//! | `Pending(s)`       | start | `Pending(start)`   | - (`s` discarded)      |
//! | `Pending(s)`       | stop  | `Idle`             | pair `(s, stop)`       |
//!
//! A trailing `Pending` start is an open session and never surfaces in any
//! derived view. [`pair_events`] is the only implementation of this table;
//! derivation and deletion both go through it so that "session N" always
//! names the same two events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventKind};
use crate::types::seconds_between;

/// A completed start/stop pair with its duration.
///
/// Derived, never stored: recomputed from the log on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub start_time: DateTime<Utc>,
    /// `stop - start` in seconds. Negative if the log has a stop recorded
    /// before its start; passed through as-is.
    pub duration_seconds: f64,
}

/// Positions of a matched start and stop within the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventPair {
    pub start_index: usize,
    pub stop_index: usize,
}

/// Pairing state machine over the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingState {
    /// No start awaiting a stop.
    #[default]
    Idle,
    /// The most recent unmatched start.
    Pending {
        index: usize,
        time: DateTime<Utc>,
    },
}

impl PairingState {
    /// Applies one event, returning the next state and any completed pair.
    #[must_use]
    pub fn step(self, index: usize, event: &Event) -> (Self, Option<EventPair>) {
        match (self, event.kind) {
            (_, EventKind::Start) => (
                Self::Pending {
                    index,
                    time: event.time,
                },
                None,
            ),
            (Self::Pending { index: start, .. }, EventKind::Stop) => (
                Self::Idle,
                Some(EventPair {
                    start_index: start,
                    stop_index: index,
                }),
            ),
            (Self::Idle, EventKind::Stop) => (Self::Idle, None),
        }
    }
}

/// Runs the pairing state machine over the log, returning matched pairs in
/// log order along with the final state.
fn run_pairing(events: &[Event]) -> (Vec<EventPair>, PairingState) {
    let mut pairs = Vec::new();
    let mut state = PairingState::Idle;

    for (index, event) in events.iter().enumerate() {
        if let PairingState::Pending { index: dropped, .. } = state {
            if event.is_start() {
                tracing::trace!(dropped, replacement = index, "start superseded by later start");
            }
        } else if event.is_stop() {
            tracing::trace!(index, "stop without pending start dropped");
        }

        let (next, pair) = state.step(index, event);
        if let Some(pair) = pair {
            pairs.push(pair);
        }
        state = next;
    }

    (pairs, state)
}

/// Pairs start and stop events, returning their positions in the log.
pub fn pair_events(events: &[Event]) -> Vec<EventPair> {
    run_pairing(events).0
}

/// Returns the trailing start that has not been stopped yet, if any.
pub fn pending_start(events: &[Event]) -> Option<&Event> {
    match run_pairing(events).1 {
        PairingState::Pending { index, .. } => events.get(index),
        PairingState::Idle => None,
    }
}

/// Derives completed sessions from the log, in the order their starts appear.
pub fn derive_sessions(events: &[Event]) -> Vec<Session> {
    pair_events(events)
        .into_iter()
        .map(|pair| {
            let start = events[pair.start_index].time;
            let stop = events[pair.stop_index].time;
            if stop < start {
                tracing::debug!(%start, %stop, "session stop precedes its start");
            }
            Session {
                start_time: start,
                duration_seconds: seconds_between(start, stop),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};

    fn ts(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "whole-second durations are exact")]
    fn alternating_pairs_yield_half_as_many_sessions() {
        let events = vec![
            Event::start(ts(0)),
            Event::stop(ts(10)),
            Event::start(ts(30)),
            Event::stop(ts(45)),
            Event::start(ts(100)),
            Event::stop(ts(101)),
        ];

        let sessions = derive_sessions(&events);
        assert_eq!(sessions.len(), events.len() / 2);
        assert_eq!(sessions[0].start_time, ts(0));
        assert_eq!(sessions[0].duration_seconds, 10.0);
        assert_eq!(sessions[1].duration_seconds, 15.0);
        assert_eq!(sessions[2].duration_seconds, 1.0);
        assert!(sessions.iter().all(|s| s.duration_seconds >= 0.0));
    }

    #[test]
    fn fractional_durations_are_kept() {
        let events = vec![
            Event::start(ts(0)),
            Event::stop(ts(0) + Duration::milliseconds(2_250)),
        ];
        let sessions = derive_sessions(&events);
        assert!((sessions[0].duration_seconds - 2.25).abs() < f64::EPSILON);
    }

    #[test]
    fn derivation_is_deterministic() {
        let events = vec![
            Event::start(ts(0)),
            Event::stop(ts(5)),
            Event::stop(ts(6)),
            Event::start(ts(7)),
        ];
        assert_eq!(derive_sessions(&events), derive_sessions(&events));
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "whole-second durations are exact")]
    fn consecutive_starts_keep_only_the_later() {
        let events = vec![
            Event::start(ts(0)),
            Event::start(ts(20)),
            Event::stop(ts(25)),
        ];

        let sessions = derive_sessions(&events);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start_time, ts(20));
        assert_eq!(sessions[0].duration_seconds, 5.0);
        assert_eq!(
            pair_events(&events),
            vec![EventPair {
                start_index: 1,
                stop_index: 2
            }]
        );
    }

    #[test]
    fn stop_without_start_is_dropped() {
        let events = vec![Event::stop(ts(0)), Event::start(ts(1)), Event::stop(ts(2))];
        let pairs = pair_events(&events);
        assert_eq!(
            pairs,
            vec![EventPair {
                start_index: 1,
                stop_index: 2
            }]
        );
    }

    #[test]
    fn second_stop_after_pair_is_dropped() {
        let events = vec![Event::start(ts(0)), Event::stop(ts(1)), Event::stop(ts(2))];
        assert_eq!(derive_sessions(&events).len(), 1);
    }

    #[test]
    fn trailing_start_is_invisible_but_pending() {
        let events = vec![Event::start(ts(0)), Event::stop(ts(1)), Event::start(ts(5))];
        assert_eq!(derive_sessions(&events).len(), 1);
        assert_eq!(pending_start(&events), Some(&Event::start(ts(5))));
    }

    #[test]
    fn no_pending_start_after_stop() {
        let events = vec![Event::start(ts(0)), Event::stop(ts(1))];
        assert_eq!(pending_start(&events), None);
        assert_eq!(pending_start(&[]), None);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "whole-second durations are exact")]
    fn negative_duration_passes_through() {
        let events = vec![Event::start(ts(10)), Event::stop(ts(4))];
        let sessions = derive_sessions(&events);
        assert_eq!(sessions[0].duration_seconds, -6.0);
    }

    #[test]
    fn empty_log_has_no_sessions() {
        assert!(derive_sessions(&[]).is_empty());
    }

    #[test]
    fn step_transition_table() {
        let start = Event::start(ts(0));
        let stop = Event::stop(ts(1));

        assert_eq!(
            PairingState::Idle.step(0, &stop),
            (PairingState::Idle, None)
        );
        let (pending, pair) = PairingState::Idle.step(3, &start);
        assert_eq!(
            pending,
            PairingState::Pending {
                index: 3,
                time: ts(0)
            }
        );
        assert_eq!(pair, None);
        assert_eq!(
            pending.step(4, &stop),
            (
                PairingState::Idle,
                Some(EventPair {
                    start_index: 3,
                    stop_index: 4
                })
            )
        );
    }
}
