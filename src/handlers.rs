use crate::errors::AppError;
use crate::models::{Ack, CreateEntryRequest, DeleteEntryRequest, TimeEntry};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::NaiveDate;
use tracing::{info, warn};

const INVALID_ENTRY: &str = "Invalid date or hours";
const INVALID_ID: &str = "Invalid id";

pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<TimeEntry>>, AppError> {
    Ok(Json(state.store.list().await?))
}

pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<Json<Ack>, AppError> {
    let Json(payload) = payload.map_err(reject_body)?;
    let (date, hours) = validate_entry(&payload).ok_or_else(|| {
        warn!(?payload, "rejected entry");
        AppError::bad_request(INVALID_ENTRY)
    })?;

    let id = state.store.insert(date, hours).await?;
    info!(id, %date, hours, "entry created");
    Ok(Json(Ack::ok()))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    payload: Result<Json<DeleteEntryRequest>, JsonRejection>,
) -> Result<Json<Ack>, AppError> {
    let Json(payload) = payload.map_err(reject_body)?;
    let id = payload.id.ok_or_else(|| AppError::bad_request(INVALID_ID))?;

    state.store.delete(id).await?;
    info!(id, "entry deleted");
    Ok(Json(Ack::ok()))
}

pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

fn validate_entry(payload: &CreateEntryRequest) -> Option<(NaiveDate, f64)> {
    let date = payload.date.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let hours = payload.hours?;
    (hours.is_finite() && hours > 0.0).then_some((date, hours))
}

fn reject_body(rejection: JsonRejection) -> AppError {
    warn!("rejected request body: {rejection}");
    AppError::bad_request(rejection.body_text())
}
