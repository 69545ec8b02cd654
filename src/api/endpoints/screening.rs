//! Screening endpoints.
//!
//! `POST /api/screening/analyze` runs the full capture → transform →
//! infer flow on a submitted drawing. Classifier failures surface as
//! structured 503 responses rather than an empty result.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::enums::TestKind;
use crate::models::screening::ScreeningRecord;
use crate::screening::{self, Drawing, ScreeningOutcome};

/// Upper bound on submitted samples; a tracing test is a few hundred.
const MAX_POINTS: usize = 50_000;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub kind: TestKind,
    pub drawing: Drawing,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ScreeningOutcome>, ApiError> {
    validate_drawing(&request.drawing)?;

    let conn = ctx.state.open_db()?;
    let model = ctx.state.model_for(request.kind);
    let outcome = screening::run_screening(&conn, model, request.kind, &request.drawing)?;
    Ok(Json(outcome))
}

pub async fn history(
    State(ctx): State<ApiContext>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ScreeningRecord>>, ApiError> {
    let limit = query.limit.unwrap_or(20).min(100);
    let conn = ctx.state.open_db()?;
    let records = screening::fetch_history(&conn, limit)?;
    Ok(Json(records))
}

fn validate_drawing(drawing: &Drawing) -> Result<(), ApiError> {
    if drawing.is_empty() {
        return Err(ApiError::BadRequest("Drawing is empty".into()));
    }
    if drawing.point_count() > MAX_POINTS {
        return Err(ApiError::BadRequest("Drawing has too many samples".into()));
    }
    for stroke in &drawing.strokes {
        let mut last_offset = f64::NEG_INFINITY;
        for point in &stroke.points {
            if !point.x.is_finite() || !point.y.is_finite() || !point.time_offset.is_finite() {
                return Err(ApiError::BadRequest(
                    "Drawing contains non-finite values".into(),
                ));
            }
            if point.time_offset < last_offset {
                return Err(ApiError::BadRequest(
                    "Stroke time offsets must be non-decreasing".into(),
                ));
            }
            last_offset = point.time_offset;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::{Stroke, StrokePoint};

    fn point(x: f64, t: f64) -> StrokePoint {
        StrokePoint { x, y: 0.0, time_offset: t }
    }

    #[test]
    fn empty_drawing_rejected() {
        let drawing = Drawing { strokes: vec![] };
        assert!(validate_drawing(&drawing).is_err());
    }

    #[test]
    fn decreasing_offsets_rejected() {
        let drawing = Drawing {
            strokes: vec![Stroke {
                points: vec![point(0.0, 0.5), point(1.0, 0.2)],
            }],
        };
        assert!(validate_drawing(&drawing).is_err());
    }

    #[test]
    fn nan_coordinates_rejected() {
        let drawing = Drawing {
            strokes: vec![Stroke {
                points: vec![point(f64::NAN, 0.0)],
            }],
        };
        assert!(validate_drawing(&drawing).is_err());
    }

    #[test]
    fn well_formed_drawing_accepted() {
        let drawing = Drawing {
            strokes: vec![Stroke {
                points: vec![point(0.0, 0.0), point(1.0, 0.1), point(2.0, 0.2)],
            }],
        };
        assert!(validate_drawing(&drawing).is_ok());
    }
}
