use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster::RosterError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("No file uploaded.")]
    MissingFile,

    #[error("Only .xlsx and .xls format allowed!")]
    UnsupportedFile,

    #[error("Storage failure: {0}")]
    Persistence(RosterError),

    #[error("Error exporting check-ins: {0}")]
    Export(RosterError),
}

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Report(_) => AppError::Export(err),
            _ if err.is_validation() => AppError::Validation(err.to_string()),
            _ => AppError::Persistence(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            AppError::MissingFile { .. } => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFile { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Export { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{self}");
        }

        let body = json!({ "success": false, "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}
