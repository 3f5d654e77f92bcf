//! Roster spreadsheets.
//!
//! Only the first worksheet is read. Its first row names the columns, every later
//! non-blank row becomes one [`RosterRow`]. Column names are matched case-insensitively.
use std::{collections::HashMap, io::Cursor};

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::{RosterError, RosterRow};

pub const ID_COLUMN: &str = "id";
pub const NAME_COLUMNS: [&str; 2] = ["cname", "name"];
pub const ENGLISH_NAME_COLUMN: &str = "ename";
pub const EMAIL_COLUMN: &str = "email";
pub const VOICE_COLUMN: &str = "voice";
pub const STATUS_COLUMN: &str = "status";

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const XLS_MIME: &str = "application/vnd.ms-excel";

pub fn is_spreadsheet(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case(XLSX_MIME) || mime.eq_ignore_ascii_case(XLS_MIME)
}

pub fn parse_workbook(bytes: Vec<u8>) -> Result<Vec<RosterRow>, RosterError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(RosterError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| cell_text(cell).map(|name| (name.to_lowercase(), index)))
        .collect();

    let roster_rows = rows
        .filter(|cells| cells.iter().any(|cell| cell_text(cell).is_some()))
        .map(|cells| {
            let field = |name: &str| {
                columns
                    .get(name)
                    .and_then(|&index| cells.get(index))
                    .and_then(cell_text)
            };

            RosterRow {
                id: field(ID_COLUMN),
                name: NAME_COLUMNS
                    .iter()
                    .find_map(|column| field(*column))
                    .unwrap_or_default(),
                english_name: field(ENGLISH_NAME_COLUMN).unwrap_or_default(),
                email: field(EMAIL_COLUMN).unwrap_or_default(),
                voice_part: field(VOICE_COLUMN).unwrap_or_default(),
                status: field(STATUS_COLUMN),
            }
        })
        .collect();

    Ok(roster_rows)
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        // numeric ids come back as floats
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string().trim().to_string(),
    };

    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::Workbook;

    use super::*;
    use crate::participants::build_roster;

    fn workbook(header: &[&str], rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (col, name) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        for (row, cells) in rows.iter().enumerate() {
            for (col, value) in cells.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(row as u32 + 1, col as u16, *value).unwrap();
                }
            }
        }

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_roster_sheet() {
        let bytes = workbook(
            &["ID", "cname", "ename", "email", "voice", "Status"],
            &[
                &["A001", "陳大文", "Chan Tai Man", "tm@example.com", "Tenor", "Valid"],
                &["", "", "", "", "", ""],
                &["A002", "李小明", "", "", "Bass", "expired"],
            ],
        );

        let rows = parse_workbook(bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id.as_deref(), Some("A001"));
        assert_eq!(rows[0].name, "陳大文");
        assert_eq!(rows[0].english_name, "Chan Tai Man");
        assert_eq!(rows[1].voice_part, "Bass");

        let roster = build_roster(rows).unwrap();
        assert!(roster["A001"].is_valid);
        assert!(!roster["A002"].is_valid);
    }

    #[test]
    fn test_numeric_ids_have_no_decimal() {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();
        sheet.write_string(0, 0, "id").unwrap();
        sheet.write_string(0, 1, "status").unwrap();
        sheet.write_number(1, 0, 1001.0).unwrap();
        sheet.write_string(1, 1, "valid").unwrap();

        let rows = parse_workbook(book.save_to_buffer().unwrap()).unwrap();
        assert_eq!(rows[0].id.as_deref(), Some("1001"));
    }

    #[test]
    fn test_missing_status_column_fails_import() {
        let bytes = workbook(&["id", "cname"], &[&["A001", "陳大文"]]);

        let rows = parse_workbook(bytes).unwrap();
        assert!(matches!(
            build_roster(rows),
            Err(RosterError::MissingStatus { .. })
        ));
    }

    #[test]
    fn test_garbage_is_not_a_workbook() {
        let err = parse_workbook(b"id,status\nA001,valid\n".to_vec()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet(XLSX_MIME));
        assert!(is_spreadsheet("application/vnd.ms-excel; charset=binary"));
        assert!(!is_spreadsheet("text/csv"));
        assert!(!is_spreadsheet(""));
    }
}
