//! `GET /api/home` — single fetch for all dashboard widgets.

use axum::extract::State;
use axum::Json;
use chrono::Local;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::home::{self, DashboardData};

pub async fn dashboard(State(ctx): State<ApiContext>) -> Result<Json<DashboardData>, ApiError> {
    let conn = ctx.state.open_db()?;
    let schedule = ctx.state.schedule()?;
    let now = Local::now().naive_local();

    let data = home::fetch_dashboard(&conn, &schedule, now)?;
    Ok(Json(data))
}
