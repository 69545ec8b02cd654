//! Medication endpoints.
//!
//! Mutations rebuild the reminder schedule so pending reminders always
//! mirror the medication list.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::medications::{self, MedicationInput, StoredMedication};

const MAX_NAME_LEN: usize = 100;
const MAX_DOSAGE_LEN: usize = 100;

#[derive(Serialize)]
pub struct AddResponse {
    pub medication_id: String,
    pub pending_reminders: usize,
}

/// `GET /api/medications` — the full medication list.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<StoredMedication>>, ApiError> {
    let conn = ctx.state.open_db()?;
    let medications = medications::fetch_medications(&conn)?;
    Ok(Json(medications))
}

/// `POST /api/medications` — add a medication and its reminder times.
pub async fn add(
    State(ctx): State<ApiContext>,
    Json(input): Json<MedicationInput>,
) -> Result<Json<AddResponse>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Medication name is required".into()));
    }
    if input.dosage.trim().is_empty() {
        return Err(ApiError::BadRequest("Dosage is required".into()));
    }
    if input.name.len() > MAX_NAME_LEN {
        return Err(ApiError::BadRequest("Medication name too long".into()));
    }
    if input.dosage.len() > MAX_DOSAGE_LEN {
        return Err(ApiError::BadRequest("Dosage too long".into()));
    }
    if input.times.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one reminder time is required".into(),
        ));
    }
    for time in &input.times {
        if !time.is_valid() {
            return Err(ApiError::BadRequest(format!(
                "Invalid reminder time: {}:{}",
                time.hour, time.minute
            )));
        }
    }

    let conn = ctx.state.open_db()?;
    let medication_id = medications::add_medication(&conn, &input)?;
    drop(conn);

    let pending_reminders = ctx.state.rebuild_reminders()?;

    Ok(Json(AddResponse {
        medication_id: medication_id.to_string(),
        pending_reminders,
    }))
}

/// `DELETE /api/medications/:id` — remove a medication; its reminders
/// disappear with the rebuild.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let medication_id: Uuid = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid medication id".into()))?;

    let conn = ctx.state.open_db()?;
    medications::delete_medication(&conn, &medication_id)?;
    drop(conn);

    ctx.state.rebuild_reminders()?;
    Ok(Json(()))
}
