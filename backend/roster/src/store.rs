//! # Participant Store
//!
//! In-memory roster mirrored to a [`JsonDocument`].
//!
//! Each mutation is a commit: the change is applied to a copy, the copy is written
//! in full, and only then does it replace the live roster. When the write fails the
//! live roster is untouched, so memory and disk never disagree.
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    ParticipantRecord, Roster, RosterError, RosterRow, document::JsonDocument,
    participants::build_roster,
};

pub struct RosterStore {
    document: JsonDocument,
    roster: Roster,
}

impl RosterStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let document = JsonDocument::new(path.as_ref());
        let roster: Roster = document.load()?.unwrap_or_default();

        info!(
            "Loaded {} participants from {}",
            roster.len(),
            document.path().display()
        );

        Ok(Self { document, roster })
    }

    pub fn get(&self, id: &str) -> Option<&ParticipantRecord> {
        self.roster.get(id)
    }

    pub fn list(&self) -> impl Iterator<Item = (&str, &ParticipantRecord)> {
        self.roster.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Discards the current roster, history included, and installs `rows`.
    pub fn replace_all(&mut self, rows: Vec<RosterRow>) -> Result<usize, RosterError> {
        let roster = build_roster(rows)?;
        self.replace(roster)
    }

    pub fn replace(&mut self, roster: Roster) -> Result<usize, RosterError> {
        self.document.save(&roster)?;
        self.roster = roster;

        Ok(self.roster.len())
    }

    pub fn clear_all(&mut self) -> Result<(), RosterError> {
        self.replace(Roster::new()).map(|_| ())
    }

    pub fn clear_check_ins(&mut self) -> Result<(), RosterError> {
        self.commit(|roster| {
            for record in roster.values_mut() {
                record.check_ins.clear();
            }
        })
    }

    /// Returns `false` without writing anything when `id` is unknown.
    pub fn record_check_in(
        &mut self,
        id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<bool, RosterError> {
        if !self.roster.contains_key(id) {
            return Ok(false);
        }

        self.commit(|roster| {
            if let Some(record) = roster.get_mut(id) {
                record.record_check_in(timestamp);
            }
        })?;

        Ok(true)
    }

    fn commit<F>(&mut self, change: F) -> Result<(), RosterError>
    where
        F: FnOnce(&mut Roster),
    {
        let mut next = self.roster.clone();
        change(&mut next);

        self.document.save(&next)?;
        self.roster = next;

        Ok(())
    }
}
