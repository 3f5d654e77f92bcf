//! # Check-in Report
//!
//! One row per participant in roster order, followed by up to [`MAX_CHECK_INS`]
//! check-in columns. Timestamps are rendered in the reference zone as
//! `YYYY-MM-DD HH:mm:ss`; missing check-ins are blank cells.
use chrono_tz::Tz;
use rust_xlsxwriter::Workbook;

use crate::{MAX_CHECK_INS, Roster, RosterError, time::format_timestamp};

pub const REPORT_SHEET: &str = "Check-ins";
pub const REPORT_FILE_NAME: &str = "checkins.xlsx";

const FIXED_HEADERS: [(&str, f64); 6] = [
    ("序號", 8.0),
    ("ID", 10.0),
    ("Chinese Name", 20.0),
    ("English Name", 20.0),
    ("Email", 30.0),
    ("Voice", 10.0),
];
const CHECK_IN_WIDTH: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub serial: usize,
    pub id: String,
    pub name: String,
    pub english_name: String,
    pub email: String,
    pub voice_part: String,
    pub check_ins: Vec<String>,
}

pub fn headers() -> Vec<String> {
    FIXED_HEADERS
        .iter()
        .map(|(name, _)| name.to_string())
        .chain((1..=MAX_CHECK_INS).map(|n| format!("Check-in {n}")))
        .collect()
}

pub fn report_rows(roster: &Roster, zone: Tz) -> Vec<ReportRow> {
    roster
        .iter()
        .enumerate()
        .map(|(index, (id, record))| ReportRow {
            serial: index + 1,
            id: id.clone(),
            name: record.name.clone(),
            english_name: record.english_name.clone(),
            email: record.email.clone(),
            voice_part: record.voice_part.clone(),
            check_ins: (0..MAX_CHECK_INS)
                .map(|i| {
                    record
                        .check_ins
                        .get(i)
                        .map(|check_in| format_timestamp(check_in, zone))
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect()
}

pub fn write_workbook(rows: &[ReportRow]) -> Result<Vec<u8>, RosterError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(REPORT_SHEET)?;

    let widths = FIXED_HEADERS
        .iter()
        .map(|(_, width)| *width)
        .chain(std::iter::repeat_n(CHECK_IN_WIDTH, MAX_CHECK_INS));

    for (col, (header, width)) in headers().iter().zip(widths).enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, header)?;
        sheet.set_column_width(col, width)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let line = index as u32 + 1;

        sheet.write_number(line, 0, row.serial as f64)?;
        for (col, value) in [
            &row.id,
            &row.name,
            &row.english_name,
            &row.email,
            &row.voice_part,
        ]
        .into_iter()
        .chain(row.check_ins.iter())
        .enumerate()
        {
            if !value.is_empty() {
                sheet.write_string(line, col as u16 + 1, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use calamine::{Data, Reader, Xlsx};
    use chrono::{DateTime, Duration, Utc};

    use super::*;
    use crate::{RosterRow, participants::build_roster, time::DEFAULT_TIME_ZONE};

    fn roster() -> Roster {
        let mut roster = build_roster(vec![
            RosterRow {
                id: Some("A001".to_string()),
                name: "陳大文".to_string(),
                status: Some("valid".to_string()),
                ..Default::default()
            },
            RosterRow {
                id: Some("A002".to_string()),
                name: "李小明".to_string(),
                status: Some("valid".to_string()),
                ..Default::default()
            },
        ])
        .unwrap();

        let first: DateTime<Utc> = "2024-03-01T01:00:00Z".parse().unwrap();
        let record = roster.get_mut("A001").unwrap();
        record.record_check_in(first);
        record.record_check_in(first + Duration::days(1));

        roster
    }

    #[test]
    fn test_headers() {
        let headers = headers();
        assert_eq!(headers.len(), 16);
        assert_eq!(headers[0], "序號");
        assert_eq!(headers[6], "Check-in 1");
        assert_eq!(headers[15], "Check-in 10");
    }

    #[test]
    fn test_report_rows() {
        let rows = report_rows(&roster(), DEFAULT_TIME_ZONE);

        assert_eq!(rows[0].serial, 1);
        assert_eq!(rows[0].check_ins.len(), MAX_CHECK_INS);
        assert_eq!(rows[0].check_ins[0], "2024-03-02 09:00:00");
        assert_eq!(rows[0].check_ins[1], "2024-03-01 09:00:00");
        assert_eq!(rows[0].check_ins[2], "");
        assert_eq!(rows[1].serial, 2);
        assert!(rows[1].check_ins.iter().all(String::is_empty));
    }

    #[test]
    fn test_workbook_contents() {
        let bytes = write_workbook(&report_rows(&roster(), DEFAULT_TIME_ZONE)).unwrap();

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(REPORT_SHEET).unwrap();

        assert_eq!(range.get_value((0, 1)), Some(&Data::String("ID".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("A001".to_string())));
        assert_eq!(
            range.get_value((1, 6)),
            Some(&Data::String("2024-03-02 09:00:00".to_string()))
        );
        assert_eq!(range.get_value((2, 0)), Some(&Data::Float(2.0)));
    }
}
