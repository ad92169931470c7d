//! Removing one derived session from the event log.

use crate::event::Event;
use crate::session::pair_events;

/// Returns a new log with the start and stop of session `session_index` removed.
///
/// `session_index` refers to the position in [`derive_sessions`](crate::derive_sessions)
/// output. Unpaired events are never touched, so every other session keeps
/// the same start and stop. An index with no session returns the log unchanged.
pub fn delete_session(events: &[Event], session_index: usize) -> Vec<Event> {
    let Some(pair) = pair_events(events).get(session_index).copied() else {
        tracing::debug!(session_index, "no session at index, log unchanged");
        return events.to_vec();
    };

    events
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pair.start_index && *i != pair.stop_index)
        .map(|(_, event)| *event)
        .collect()
}
