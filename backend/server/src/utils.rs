use axum::extract::Multipart;
use roster::sheet::is_spreadsheet;
use tracing::warn;

use crate::error::AppError::{self, MalformedPayload, MissingFile, UnsupportedFile};

pub const UPLOAD_FIELD: &str = "file";

/// Bytes of the uploaded roster spreadsheet. Other form fields are ignored.
pub async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Bad multipart body: {e}");
        MalformedPayload
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default();
        if !is_spreadsheet(content_type) {
            warn!("Rejected upload with content type {content_type:?}");
            return Err(UnsupportedFile);
        }

        let bytes = field.bytes().await.map_err(|e| {
            warn!("Upload interrupted: {e}");
            MalformedPayload
        })?;

        if bytes.is_empty() {
            return Err(MissingFile);
        }

        return Ok(bytes.to_vec());
    }

    Err(MissingFile)
}

pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::trimmed;

    #[test]
    fn test_trimmed() {
        assert_eq!(trimmed(Some("  A001 ".to_string())), Some("A001".to_string()));
        assert_eq!(trimmed(Some("   ".to_string())), None);
        assert_eq!(trimmed(None), None);
    }
}
