//! Idle gaps between consecutive session starts.

use serde::Serialize;

use crate::session::Session;
use crate::types::seconds_between;

/// A session paired with the time since the previous session started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionWithIdle {
    #[serde(flatten)]
    pub session: Session,
    /// `None` for the first session. Can be negative when the log is not
    /// chronologically ordered.
    pub idle_seconds: Option<f64>,
}

/// Annotates each session with the gap from the previous session's start.
pub fn with_idle_gaps(sessions: &[Session]) -> Vec<SessionWithIdle> {
    let mut previous: Option<&Session> = None;
    sessions
        .iter()
        .map(|session| {
            let idle_seconds =
                previous.map(|prev| seconds_between(prev.start_time, session.start_time));
            previous = Some(session);
            SessionWithIdle {
                session: *session,
                idle_seconds,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::event::Event;
    use crate::session::derive_sessions;

    fn ts(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    fn session(start: i64, duration: f64) -> Session {
        Session {
            start_time: ts(start),
            duration_seconds: duration,
        }
    }

    #[test]
    fn first_session_has_no_idle_gap() {
        let gaps = with_idle_gaps(&[session(0, 5.0), session(60, 5.0), session(90, 1.0)]);
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0].idle_seconds, None);
        assert_eq!(gaps[1].idle_seconds, Some(60.0));
        assert_eq!(gaps[2].idle_seconds, Some(30.0));
    }

    #[test]
    fn gap_is_negative_for_out_of_order_sessions() {
        let gaps = with_idle_gaps(&[session(100, 1.0), session(40, 1.0)]);
        assert_eq!(gaps[1].idle_seconds, Some(-60.0));
    }

    #[test]
    fn length_matches_derived_sessions() {
        let events = vec![
            Event::start(ts(0)),
            Event::stop(ts(3)),
            Event::stop(ts(4)),
            Event::start(ts(8)),
            Event::stop(ts(9)),
            Event::start(ts(20)),
        ];
        let sessions = derive_sessions(&events);
        let gaps = with_idle_gaps(&sessions);
        assert_eq!(gaps.len(), sessions.len());
        assert_eq!(gaps[0].idle_seconds, None);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(with_idle_gaps(&[]).is_empty());
    }

    #[test]
    fn serializes_flat() {
        let gaps = with_idle_gaps(&[session(0, 2.0)]);
        let json = serde_json::to_value(&gaps[0]).unwrap();
        assert_eq!(json["duration_seconds"], 2.0);
        assert!(json["idle_seconds"].is_null());
    }
}
