//! # Check-in Engine
//!
//! Decides what a single scan does to the roster.
//!
//! ## Flow
//! 1. Look the scanned id up and record a scan log entry. The entry's status only says
//!    whether the participant exists and is valid.
//! 2. Unknown id: `NotFound`. Nothing else changes.
//! 3. Invalid participant: `Invalid`. Nothing else changes.
//! 4. Valid participant: count existing check-ins on the same calendar day (reference zone).
//!    - None yet, or demo mode: `Accepted`. The timestamp is prepended to the ledger, the
//!      roster document is written, then the daily counter is incremented.
//!    - Otherwise: `Duplicate`. Nothing else changes.
//!
//! Business outcomes are never errors. The only failure is a roster write, in which case
//! neither the ledger nor the daily counter moves.
//!
//! ## Notes
//! Demo mode accepts every scan, so repeated demo scans can leave several entries for the
//! same day, even with identical timestamps.
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use roster::{ParticipantRecord, RosterError, RosterStore, time::calendar_day};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    counter::DailyCounter,
    mode::CheckInMode,
    scan_log::{ScanEntry, ScanLog},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Accepted,
    Duplicate,
    Invalid,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct CheckInAttempt {
    pub participant_id: String,
    pub timestamp: DateTime<Utc>,
    pub mode: CheckInMode,
    pub activity_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReceipt {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<ParticipantRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_check_ins: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_count: Option<usize>,
    pub daily_check_in_count: u64,
    pub total_people: usize,
    pub activity_name: String,
}

impl CheckInReceipt {
    pub fn message(&self) -> String {
        let name = self
            .participant
            .as_ref()
            .map(|participant| participant.name.as_str())
            .unwrap_or_default();

        match self.outcome {
            Outcome::Accepted => format!("{name}，簽到成功。請進入活動場地。"),
            Outcome::Duplicate => format!("{name}，您今天已經簽到過。"),
            Outcome::Invalid => "抱歉，您的資料無效。".to_string(),
            Outcome::NotFound => "找不到參與者資料。".to_string(),
        }
    }
}

/// Roster plus scan telemetry. Everything that must not interleave between
/// requests lives here, behind one lock in the server state.
pub struct Ledger {
    store: RosterStore,
    scans: ScanLog,
    zone: Tz,
}

impl Ledger {
    pub fn new(store: RosterStore, zone: Tz) -> Self {
        Self {
            store,
            scans: ScanLog::default(),
            zone,
        }
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RosterStore {
        &mut self.store
    }

    pub fn scans(&self) -> &ScanLog {
        &self.scans
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn check_in(
        &mut self,
        attempt: CheckInAttempt,
        daily: &DailyCounter,
    ) -> Result<CheckInReceipt, RosterError> {
        let CheckInAttempt {
            participant_id,
            timestamp,
            mode,
            activity_name,
        } = attempt;

        let participant = self.store.get(&participant_id);
        self.scans
            .record(ScanEntry::observe(&participant_id, timestamp, participant));

        #[cfg(feature = "verbose")]
        info!("Scan {participant_id} at {timestamp}, {} entries logged", self.scans.len());

        let mut receipt = CheckInReceipt {
            outcome: Outcome::NotFound,
            participant: None,
            multiple_check_ins: None,
            check_in_count: None,
            daily_check_in_count: daily.get(),
            total_people: self.store.len(),
            activity_name,
        };

        let Some(participant) = participant else {
            debug!("Unknown participant {participant_id}");
            return Ok(receipt);
        };

        if !participant.is_valid {
            debug!("Invalid participant {participant_id}");
            receipt.outcome = Outcome::Invalid;
            return Ok(receipt);
        }

        let same_day = participant.check_ins_on(calendar_day(&timestamp, self.zone), self.zone);
        receipt.check_in_count = Some(same_day + 1);
        receipt.multiple_check_ins = Some(same_day > 0);

        if same_day > 0 && mode == CheckInMode::Production {
            info!("Duplicate check-in for {participant_id} ({same_day} today)");
            receipt.outcome = Outcome::Duplicate;
            receipt.participant = Some(participant.clone());
            return Ok(receipt);
        }

        self.store.record_check_in(&participant_id, timestamp)?;
        receipt.daily_check_in_count = daily.increment();
        receipt.participant = self.store.get(&participant_id).cloned();
        receipt.outcome = Outcome::Accepted;

        info!(
            "Checked in {participant_id} ({} mode, {} today)",
            mode.label(),
            same_day + 1
        );

        Ok(receipt)
    }

    /// Empties every participant's ledger and the daily counter.
    pub fn clear_check_ins(&mut self, daily: &DailyCounter) -> Result<(), RosterError> {
        self.store.clear_check_ins()?;
        daily.reset();
        Ok(())
    }
}
