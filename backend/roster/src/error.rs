use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Row {row} has no participant id")]
    MissingId { row: usize },

    #[error("Row {row} ({id}) has no status")]
    MissingStatus { row: usize, id: String },

    #[error("Workbook has no worksheets")]
    EmptyWorkbook,

    #[error("Unreadable workbook: {0}")]
    Sheet(#[from] calamine::Error),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report error: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),
}

impl RosterError {
    /// Errors caused by the caller's input rather than by storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RosterError::MissingId { .. }
                | RosterError::MissingStatus { .. }
                | RosterError::EmptyWorkbook
                | RosterError::Sheet(_)
        )
    }
}
