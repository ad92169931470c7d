//! CLI subcommand implementations.

pub mod delete;
pub mod events;
pub mod export;
pub mod import;
pub mod reset;
pub mod sessions;
pub mod share;
pub mod stats;
pub mod status;
pub mod timer;
pub mod util;
