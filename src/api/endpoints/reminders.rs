//! `GET /api/reminders/upcoming` — the next pending reminders.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reminders::UpcomingReminder;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<usize>,
}

pub async fn upcoming(
    State(ctx): State<ApiContext>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<UpcomingReminder>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let schedule = ctx.state.schedule()?;
    let now = Local::now().naive_local();
    Ok(Json(schedule.upcoming(now, limit)))
}
