//! Mood journal endpoints.
//!
//! Five endpoints:
//! - `POST /api/journal/record` — record (or replace) a day's mood
//! - `GET /api/journal/history` — all entries, newest first
//! - `GET /api/journal/month/:year/:month` — calendar grid data
//! - `GET /api/journal/:date` — one day's entry (detail popup)
//! - `DELETE /api/journal/:date` — remove a day's entry

use axum::extract::{Path, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::journal::{self, MonthView, MoodEntryInput, StoredMoodEntry};

const MAX_NOTES_LEN: usize = 500;

#[derive(Serialize)]
pub struct RecordResponse {
    pub entry_id: String,
}

/// Records a mood entry, replacing any existing entry for the same day.
pub async fn record(
    State(ctx): State<ApiContext>,
    Json(input): Json<MoodEntryInput>,
) -> Result<Json<RecordResponse>, ApiError> {
    if input.mood > 4 {
        return Err(ApiError::BadRequest("Mood must be between 0 and 4".into()));
    }
    if NaiveDate::parse_from_str(&input.date, "%Y-%m-%d").is_err() {
        return Err(ApiError::BadRequest(
            "Invalid date format (expected YYYY-MM-DD)".into(),
        ));
    }
    if input.notes.len() > MAX_NOTES_LEN {
        return Err(ApiError::BadRequest(
            "Notes must be 500 characters or fewer".into(),
        ));
    }
    for symptom in &input.symptoms {
        if !journal::SYMPTOM_TAGS.contains(&symptom.as_str()) {
            return Err(ApiError::BadRequest(format!("Unknown symptom: {symptom}")));
        }
    }

    let conn = ctx.state.open_db()?;
    let entry_id = journal::record_mood(&conn, &input)?;

    Ok(Json(RecordResponse {
        entry_id: entry_id.to_string(),
    }))
}

/// Full mood history, newest first.
pub async fn history(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<StoredMoodEntry>>, ApiError> {
    let conn = ctx.state.open_db()?;
    let entries = journal::fetch_entries(&conn)?;
    Ok(Json(entries))
}

/// Calendar grid for one month.
pub async fn month(
    State(ctx): State<ApiContext>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthView>, ApiError> {
    if !(1..=12).contains(&month) {
        return Err(ApiError::BadRequest(format!("Invalid month: {month}")));
    }
    let conn = ctx.state.open_db()?;
    let today = Local::now().date_naive();
    let view = journal::month_view(&conn, year, month, today)?;
    Ok(Json(view))
}

/// One day's entry, for the detail view.
pub async fn day(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
) -> Result<Json<StoredMoodEntry>, ApiError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Invalid date format (expected YYYY-MM-DD)".into()))?;
    let conn = ctx.state.open_db()?;
    journal::fetch_entry_for_date(&conn, date)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No mood entry for {date}")))
}

/// Deletes the entry for one day.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(date): Path<String>,
) -> Result<Json<()>, ApiError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Invalid date format (expected YYYY-MM-DD)".into()))?;
    let conn = ctx.state.open_db()?;
    journal::delete_entry(&conn, date)?;
    Ok(Json(()))
}
