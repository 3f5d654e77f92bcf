//! # Participants
//!
//! ## Record
//! - Keyed by the external participant id, set at import and never changed afterwards
//! - Descriptive fields are overwritten wholesale when the roster is re-imported
//! - `checkIns` is most-recent-first and never holds more than [`MAX_CHECK_INS`] timestamps
//!
//! ## Persisted Shape
//! Field names match the documents written by earlier deployments:
//! `name`, `ename`, `email`, `voice`, `isValid`, `checkIns`.
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{RosterError, time::calendar_day};

pub const MAX_CHECK_INS: usize = 10;
pub const VALID_STATUS: &str = "valid";

/// Participant id to record, in import order.
pub type Roster = IndexMap<String, ParticipantRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "ename")]
    pub english_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "voice")]
    pub voice_part: String,
    pub is_valid: bool,
    #[serde(default)]
    pub check_ins: Vec<DateTime<Utc>>,
}

/// One imported row, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "cname", alias = "displayName")]
    pub name: String,
    #[serde(default, alias = "ename")]
    pub english_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "voice")]
    pub voice_part: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ParticipantRecord {
    pub fn check_ins_on(&self, day: NaiveDate, zone: Tz) -> usize {
        self.check_ins
            .iter()
            .filter(|check_in| calendar_day(check_in, zone) == day)
            .count()
    }

    pub fn record_check_in(&mut self, timestamp: DateTime<Utc>) {
        self.check_ins.insert(0, timestamp);
        self.check_ins.truncate(MAX_CHECK_INS);
    }
}

impl RosterRow {
    /// `row` is the 1-based data row number, used only in error messages.
    pub fn into_record(self, row: usize) -> Result<(String, ParticipantRecord), RosterError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(RosterError::MissingId { row })?;

        let status = self
            .status
            .ok_or_else(|| RosterError::MissingStatus {
                row,
                id: id.clone(),
            })?;

        let record = ParticipantRecord {
            name: self.name,
            english_name: self.english_name,
            email: self.email,
            voice_part: self.voice_part,
            is_valid: status.trim().eq_ignore_ascii_case(VALID_STATUS),
            check_ins: Vec::new(),
        };

        Ok((id, record))
    }
}

/// Validates every row before building anything, so a bad row yields no roster at all.
pub fn build_roster(rows: Vec<RosterRow>) -> Result<Roster, RosterError> {
    let mut roster = Roster::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let (id, record) = row.into_record(index + 1)?;

        if roster.insert(id.clone(), record).is_some() {
            warn!("Duplicate participant id {id}, keeping the later row");
        }
    }

    Ok(roster)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::time::DEFAULT_TIME_ZONE;

    fn row(id: &str, status: Option<&str>) -> RosterRow {
        RosterRow {
            id: Some(id.to_string()),
            name: format!("Name {id}"),
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let roster = build_roster(vec![
            row("P1", Some("Valid")),
            row("P2", Some("VALID ")),
            row("P3", Some("invalid")),
            row("P4", Some("")),
        ])
        .unwrap();

        assert!(roster["P1"].is_valid);
        assert!(roster["P2"].is_valid);
        assert!(!roster["P3"].is_valid);
        assert!(!roster["P4"].is_valid);
    }

    #[test]
    fn test_missing_status_rejects_everything() {
        let result = build_roster(vec![row("P1", Some("valid")), row("P2", None)]);

        match result {
            Err(RosterError::MissingStatus { row, id }) => {
                assert_eq!(row, 2);
                assert_eq!(id, "P2");
            }
            other => panic!("expected missing status, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let mut blank = row("  ", Some("valid"));
        assert!(matches!(
            build_roster(vec![blank.clone()]),
            Err(RosterError::MissingId { row: 1 })
        ));

        blank.id = None;
        assert!(matches!(
            build_roster(vec![blank]),
            Err(RosterError::MissingId { row: 1 })
        ));
    }

    #[test]
    fn test_duplicate_ids_keep_later_row() {
        let mut later = row("P1", Some("invalid"));
        later.name = "Later".to_string();

        let roster = build_roster(vec![row("P1", Some("valid")), later]).unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster["P1"].name, "Later");
        assert!(!roster["P1"].is_valid);
    }

    #[test]
    fn test_check_ins_are_capped() {
        let (_, mut record) = row("P1", Some("valid")).into_record(1).unwrap();
        let start = utc("2024-03-01T01:00:00Z");

        for minute in 0..15 {
            record.record_check_in(start + Duration::minutes(minute));
        }

        assert_eq!(record.check_ins.len(), MAX_CHECK_INS);
        assert_eq!(record.check_ins[0], start + Duration::minutes(14));
        assert_eq!(record.check_ins[9], start + Duration::minutes(5));
    }

    #[test]
    fn test_check_ins_on_counts_reference_day() {
        let (_, mut record) = row("P1", Some("valid")).into_record(1).unwrap();
        record.record_check_in(utc("2024-03-01T15:00:00Z"));
        record.record_check_in(utc("2024-03-01T17:00:00Z"));
        record.record_check_in(utc("2024-03-02T01:00:00Z"));

        let day = utc("2024-03-02T02:00:00Z")
            .with_timezone(&DEFAULT_TIME_ZONE)
            .date_naive();
        assert_eq!(record.check_ins_on(day, DEFAULT_TIME_ZONE), 2);
    }

    #[test]
    fn test_persisted_field_names() {
        let (_, record) = row("P1", Some("valid")).into_record(1).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        for key in ["name", "ename", "email", "voice", "isValid", "checkIns"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_row_accepts_sheet_column_names() {
        let parsed: RosterRow = serde_json::from_value(serde_json::json!({
            "id": "P1",
            "cname": "陳大文",
            "ename": "Chan Tai Man",
            "voice": "Tenor",
            "status": "valid"
        }))
        .unwrap();

        assert_eq!(parsed.name, "陳大文");
        assert_eq!(parsed.english_name, "Chan Tai Man");
        assert_eq!(parsed.voice_part, "Tenor");
    }
}
