//! # Roster
//!
//! Participant data shared by the check-in server and the offline `process` tool.
//!
//! ## Documents
//!
//! - Roster document (**JSON**): map of participant id to record, check-in history included.
//!   Rewritten in full on every mutation, never patched.
//! - Activity document (**JSON**): `{ "currentActivityName": string }`, owned by the server.
//!
//! ## Spreadsheets
//!
//! - Import: first worksheet, header row names the columns (`id`, `cname`, `ename`, `email`, `voice`, `status`).
//! - Export: one row per participant with up to 10 check-in columns rendered in the reference time zone.
use std::path::Path;

pub mod document;
pub mod error;
pub mod participants;
pub mod report;
pub mod sheet;
pub mod store;
pub mod time;

pub use error::RosterError;
pub use participants::{MAX_CHECK_INS, ParticipantRecord, Roster, RosterRow};
pub use store::RosterStore;

use document::JsonDocument;

pub const ROSTER_PATH: &str = "participants_data.json";
pub const ACTIVITY_PATH: &str = "current_activity.json";

pub fn get_roster(path: impl AsRef<Path>) -> Result<Roster, RosterError> {
    Ok(JsonDocument::new(path.as_ref())
        .load()?
        .unwrap_or_default())
}

pub fn write_roster(path: impl AsRef<Path>, roster: &Roster) -> Result<(), RosterError> {
    JsonDocument::new(path.as_ref()).save(roster)
}
