//! Core domain logic for the chrono-share stopwatch.
//!
//! This crate is a pure engine over a caller-owned event log:
//! - Session derivation: pairing start/stop events into sessions
//! - Idle gaps and rolling-window analytics over derived sessions
//! - Session deletion that preserves the pairing of every other session
//! - Export formatting and share-payload reconstruction
//!
//! Nothing here performs I/O. Callers load the log, hand it in, and persist
//! whatever replacement log comes back.

pub mod analytics;
mod deletion;
pub mod event;
pub mod export;
mod format;
mod idle;
pub mod session;
pub mod share;
mod types;

pub use analytics::{
    AnalyticsWindow, WindowSummary, moving_average_duration, moving_average_start_gap,
};
pub use deletion::delete_session;
pub use event::{Event, EventKind, RawEvent, parse_event_log};
pub use export::{ExportFormat, SessionRow, events_to_csv, sessions_to_csv, sessions_to_json};
pub use format::format_elapsed;
pub use idle::{SessionWithIdle, with_idle_gaps};
pub use session::{EventPair, PairingState, Session, derive_sessions, pair_events, pending_start};
pub use share::{ShareError, SharePayload};
pub use types::{ValidationError, seconds_between};
