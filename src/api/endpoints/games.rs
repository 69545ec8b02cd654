//! Game endpoints: tapping high score and tracing outline preparation.

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::games::{tapping, tracing as tracing_game};

#[derive(Serialize)]
pub struct HighScoreResponse {
    pub high_score: u32,
}

#[derive(Deserialize)]
pub struct SubmitScoreRequest {
    pub score: u32,
}

#[derive(Deserialize)]
pub struct OutlineRequest {
    /// Base64-encoded photo (JPEG or PNG).
    pub image: String,
}

#[derive(Serialize)]
pub struct OutlineResponse {
    /// Base64-encoded PNG outline.
    pub outline: String,
}

/// `GET /api/games/tapping/high-score`
pub async fn high_score(State(ctx): State<ApiContext>) -> Result<Json<HighScoreResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let high_score = tapping::load_high_score(&conn)?;
    Ok(Json(HighScoreResponse { high_score }))
}

/// `POST /api/games/tapping/score` — submit a finished round's score.
/// Returns the (possibly updated) high score.
pub async fn submit_score(
    State(ctx): State<ApiContext>,
    Json(request): Json<SubmitScoreRequest>,
) -> Result<Json<HighScoreResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let high_score = tapping::record_score(&conn, request.score)?;
    Ok(Json(HighScoreResponse { high_score }))
}

/// `POST /api/games/tracing/outline` — reduce a photo to a traceable
/// line overlay.
pub async fn outline(
    Json(request): Json<OutlineRequest>,
) -> Result<Json<OutlineResponse>, ApiError> {
    let image_bytes = BASE64
        .decode(&request.image)
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image: {e}")))?;

    let outline_png = tracing_game::prepare_outline(&image_bytes)?;

    Ok(Json(OutlineResponse {
        outline: BASE64.encode(outline_png),
    }))
}
