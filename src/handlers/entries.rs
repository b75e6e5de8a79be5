use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::entry::{BreakfastEntry, CreateEntryRequest, DeleteResponse, UpdateEntryRequest};
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<Json<BreakfastEntry>> {
    body.validate()?;

    let entry = BreakfastEntry::create(body, &Local::now())
        .ok_or_else(|| AppError::Validation("timestamp is out of range".into()))?;

    state.journal.save_entry(entry.clone()).await?;
    tracing::info!(entry_id = %entry.id, date_key = %entry.date_key, "Breakfast logged");

    Ok(Json(entry))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<BreakfastEntry>> {
    Json(state.journal.all_entries().await)
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> AppResult<Json<BreakfastEntry>> {
    let entry = state
        .journal
        .entry_by_id(&entry_id)
        .await
        .ok_or(AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(body): Json<UpdateEntryRequest>,
) -> AppResult<Json<BreakfastEntry>> {
    body.validate()?;

    let existing = state
        .journal
        .entry_by_id(&entry_id)
        .await
        .ok_or(AppError::NotFound("Entry not found".into()))?;

    let updated = existing.with_changes(body);
    state.journal.update_entry(updated.clone()).await?;

    Ok(Json(updated))
}

/// Idempotent: deleting an unknown id still reports success.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    state.journal.delete_entry(&entry_id).await?;

    Ok(Json(DeleteResponse {
        deleted: true,
        id: entry_id,
    }))
}

/// Resets the journal. A following read sees no entries.
pub async fn clear_entries(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state.journal.clear().await?;
    tracing::info!("Breakfast journal cleared");

    Ok(Json(json!({ "cleared": true })))
}

pub async fn latest_for_day(
    State(state): State<AppState>,
    Path(date_key): Path<String>,
) -> AppResult<Json<BreakfastEntry>> {
    let entry = state
        .journal
        .latest_entry_for_date(&date_key)
        .await
        .ok_or(AppError::NotFound(format!("No entry for {date_key}")))?;

    Ok(Json(entry))
}
