//! # Scan Log
//!
//! Every scan attempt, accepted or not, most recent first. Transient: starts empty
//! on every boot.
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use roster::ParticipantRecord;
use serde::Serialize;

pub const MAX_SCAN_ENTRIES: usize = 100;
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    Valid,
    Invalid,
    #[serde(rename = "Not Found")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    pub id: String,
    pub time: DateTime<Utc>,
    pub name: String,
    pub status: ScanStatus,
}

impl ScanEntry {
    /// Status reflects validity only, never whether the check-in turns out to be a duplicate.
    pub fn observe(id: &str, time: DateTime<Utc>, participant: Option<&ParticipantRecord>) -> Self {
        let (name, status) = match participant {
            None => (UNKNOWN_NAME.to_string(), ScanStatus::NotFound),
            Some(record) if record.is_valid => (record.name.clone(), ScanStatus::Valid),
            Some(record) => (record.name.clone(), ScanStatus::Invalid),
        };

        Self {
            id: id.to_string(),
            time,
            name,
            status,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanLog {
    entries: VecDeque<ScanEntry>,
}

impl ScanLog {
    pub fn record(&mut self, entry: ScanEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(MAX_SCAN_ENTRIES);
    }

    pub fn entries(&self) -> Vec<ScanEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
