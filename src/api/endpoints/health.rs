//! `GET /api/health` — liveness probe with version info.

use axum::Json;
use serde::Serialize;

use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        name: config::APP_NAME,
        version: config::APP_VERSION,
        status: "ok",
    })
}
