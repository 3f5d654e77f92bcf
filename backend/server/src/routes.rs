use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use roster::{
    ParticipantRecord, RosterRow,
    report::{REPORT_FILE_NAME, report_rows, write_workbook},
    sheet::{XLSX_MIME, parse_workbook},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    checkin::{CheckInAttempt, CheckInReceipt},
    error::AppError,
    mode::CheckInMode,
    scan_log::ScanEntry,
    state::State as AppState,
    utils::{read_upload, trimmed},
};

type Shared = State<Arc<AppState>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPayload {
    #[serde(alias = "participantId")]
    pub qr_data: String,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_demo_mode: Option<bool>,
    #[serde(default)]
    pub activity_name: Option<String>,
}

#[derive(Serialize)]
pub struct CheckInResponse {
    pub message: String,
    #[serde(flatten)]
    pub receipt: CheckInReceipt,
}

#[derive(Deserialize)]
pub struct ImportPayload {
    pub participants: Vec<RosterRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub message: String,
    pub total_people: usize,
}

#[derive(Serialize)]
pub struct ParticipantView {
    pub id: String,
    #[serde(flatten)]
    pub record: ParticipantRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModePayload {
    pub is_demo_mode: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPayload {
    #[serde(default)]
    pub activity_name: Option<String>,
}

pub async fn check_in_handler(
    State(state): Shared,
    Json(payload): Json<CheckInPayload>,
) -> Result<Json<CheckInResponse>, AppError> {
    let participant_id = trimmed(Some(payload.qr_data)).ok_or(AppError::MalformedPayload)?;

    let mode = payload
        .is_demo_mode
        .map(CheckInMode::from_demo)
        .unwrap_or_else(|| state.mode.mode());

    let activity_name = match trimmed(payload.activity_name) {
        Some(name) => name,
        None => state.activity.lock().await.get().to_string(),
    };

    let attempt = CheckInAttempt {
        participant_id,
        timestamp: payload.check_in_time.unwrap_or_else(Utc::now),
        mode,
        activity_name,
    };

    let receipt = state.ledger.lock().await.check_in(attempt, &state.daily)?;

    Ok(Json(CheckInResponse {
        message: receipt.message(),
        receipt,
    }))
}

pub async fn upload_participants_handler(
    State(state): Shared,
    multipart: Multipart,
) -> Result<Json<RosterResponse>, AppError> {
    let bytes = read_upload(multipart).await?;
    let rows = parse_workbook(bytes)?;

    install_roster(&state, rows).await
}

pub async fn import_participants_handler(
    State(state): Shared,
    Json(payload): Json<ImportPayload>,
) -> Result<Json<RosterResponse>, AppError> {
    install_roster(&state, payload.participants).await
}

async fn install_roster(
    state: &AppState,
    rows: Vec<RosterRow>,
) -> Result<Json<RosterResponse>, AppError> {
    let total_people = state.ledger.lock().await.store_mut().replace_all(rows)?;
    info!("Roster replaced, {total_people} participants");

    Ok(Json(RosterResponse {
        message: "Participants updated successfully".to_string(),
        total_people,
    }))
}

pub async fn clear_participants_handler(
    State(state): Shared,
) -> Result<Json<RosterResponse>, AppError> {
    state.ledger.lock().await.store_mut().clear_all()?;
    info!("Roster cleared");

    Ok(Json(RosterResponse {
        message: "All participant data cleared successfully".to_string(),
        total_people: 0,
    }))
}

pub async fn participants_handler(State(state): Shared) -> Json<Vec<ParticipantView>> {
    let ledger = state.ledger.lock().await;

    let participants = ledger
        .store()
        .list()
        .map(|(id, record)| ParticipantView {
            id: id.to_string(),
            record: record.clone(),
        })
        .collect();

    Json(participants)
}

pub async fn total_people_handler(State(state): Shared) -> Json<Value> {
    let total_people = state.ledger.lock().await.store().len();
    Json(json!({ "totalPeople": total_people }))
}

pub async fn clear_check_ins_handler(State(state): Shared) -> Result<Json<Value>, AppError> {
    state
        .ledger
        .lock()
        .await
        .clear_check_ins(&state.daily)?;
    info!("All check-in records cleared");

    Ok(Json(json!({
        "success": true,
        "message": "All check-in records cleared successfully"
    })))
}

pub async fn export_handler(State(state): Shared) -> Result<impl IntoResponse, AppError> {
    let rows = {
        let ledger = state.ledger.lock().await;
        report_rows(ledger.store().roster(), ledger.zone())
    };

    let bytes = write_workbook(&rows)?;
    info!("Exported {} participants", rows.len());

    Ok((
        [
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={REPORT_FILE_NAME}"),
            ),
            (CONTENT_TYPE, XLSX_MIME.to_string()),
        ],
        bytes,
    ))
}

pub async fn scan_entries_handler(State(state): Shared) -> Json<Vec<ScanEntry>> {
    Json(state.ledger.lock().await.scans().entries())
}

pub async fn daily_count_handler(State(state): Shared) -> Json<Value> {
    Json(json!({ "dailyCheckInCount": state.daily.get() }))
}

pub async fn reset_daily_count_handler(State(state): Shared) -> Json<Value> {
    let previous = state.daily.reset();
    info!("Daily check-in count reset from {previous}");

    Json(json!({
        "success": true,
        "message": "今日總簽到次數已重置",
        "dailyCheckInCount": 0
    }))
}

pub async fn current_activity_handler(State(state): Shared) -> Json<Value> {
    let activity = state.activity.lock().await;
    Json(json!({ "currentActivityName": activity.get() }))
}

pub async fn set_activity_handler(
    State(state): Shared,
    Json(payload): Json<ActivityPayload>,
) -> Result<Json<Value>, AppError> {
    let name = payload.activity_name.unwrap_or_default();
    state.activity.lock().await.set(&name)?;

    Ok(Json(json!({
        "success": true,
        "message": "Current activity name updated successfully"
    })))
}

pub async fn demo_mode_handler(State(state): Shared) -> Json<Value> {
    Json(json!({ "isDemoMode": state.mode.is_demo() }))
}

pub async fn set_demo_mode_handler(
    State(state): Shared,
    Json(payload): Json<ModePayload>,
) -> Json<Value> {
    state.mode.set_demo(payload.is_demo_mode);

    let label = state.mode.mode().label();
    info!("Switched to {label} mode");

    Json(json!({
        "success": true,
        "message": format!("Switched to {label} mode")
    }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "message": "API is working" }))
}
