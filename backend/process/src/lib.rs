//! # Roster Processing
//!
//! Offline counterpart of the server's upload and export routes, for preparing a
//! roster document before an event or pulling a report after one without a
//! running server.
//!
//! ## Import
//! 1. Read the first worksheet of the roster spreadsheet.
//! 2. Validate every row. A single row without a status aborts the import and leaves
//!    the existing roster document untouched.
//! 3. Write the roster document in full. Any previous check-in history is discarded.
//!
//! ## Export
//! 1. Load the roster document.
//! 2. Render every participant with up to 10 check-in columns in the reference zone.
//! 3. Write the workbook.
use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use roster::{
    get_roster,
    participants::build_roster,
    report::{report_rows, write_workbook},
    sheet::parse_workbook,
    write_roster,
};

pub fn import_sheet(sheet_path: &Path, roster_path: &Path) -> Result<usize> {
    let bytes =
        fs::read(sheet_path).with_context(|| format!("reading {}", sheet_path.display()))?;

    let rows = parse_workbook(bytes)?;
    println!("Rows Found: {}", rows.len());

    let roster = build_roster(rows)?;
    write_roster(roster_path, &roster)?;

    println!("Participants Written: {}", roster.len());
    println!(
        "Valid Participants: {}",
        roster.values().filter(|record| record.is_valid).count()
    );

    Ok(roster.len())
}

pub fn export_report(roster_path: &Path, report_path: &Path, zone: Tz) -> Result<usize> {
    let roster = get_roster(roster_path)
        .with_context(|| format!("loading {}", roster_path.display()))?;

    let rows = report_rows(&roster, zone);
    let bytes = write_workbook(&rows)?;
    fs::write(report_path, bytes).with_context(|| format!("writing {}", report_path.display()))?;

    println!("Participants Exported: {}", rows.len());
    println!(
        "Check-ins Exported: {}",
        roster
            .values()
            .map(|record| record.check_ins.len())
            .sum::<usize>()
    );

    Ok(rows.len())
}
