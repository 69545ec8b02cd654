//! Handwriting screening — the capture → transform → infer → display flow.
//!
//! A completed spiral or wave drawing is reduced to the three kinematic
//! scalars and the fixed-size raster; the raster alone goes to the risk
//! classifier, and the thresholded label plus the scalars come back as
//! one outcome, persisted for the history view. A classifier failure
//! aborts the run with a typed error and persists nothing.

pub mod features;
pub mod raster;
pub mod stroke;

pub use features::{extract_stats, DrawingStats};
pub use raster::{rasterize, Raster};
pub use stroke::{Drawing, Stroke, StrokePoint};

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::classifier::{classify, ClassifierError, RiskModel};
use crate::db::DatabaseError;
use crate::models::enums::{RiskLabel, TestKind};
use crate::models::screening::ScreeningRecord;

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Result of one screening run, returned to the caller and persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub id: String,
    pub kind: TestKind,
    pub score: f32,
    pub label: RiskLabel,
    pub stats: DrawingStats,
    pub created_at: String,
}

/// Runs one screening: stats, raster, inference, threshold, persist.
pub fn run_screening(
    conn: &Connection,
    model: &dyn RiskModel,
    kind: TestKind,
    drawing: &Drawing,
) -> Result<ScreeningOutcome, ScreeningError> {
    let stats = extract_stats(drawing);
    let raster = rasterize(drawing);

    let score = model.predict(&raster)?;
    let label = classify(score);

    let id = Uuid::new_v4();
    let created_at = Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    conn.execute(
        "INSERT INTO screenings
         (id, kind, score, label, total_time, path_length, velocity_sd, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id.to_string(),
            kind.as_str(),
            score as f64,
            label.as_str(),
            stats.total_time,
            stats.path_length,
            stats.velocity_sd,
            created_at,
        ],
    )
    .map_err(DatabaseError::from)?;

    tracing::debug!(
        kind = kind.as_str(),
        score,
        label = label.as_str(),
        "Screening completed"
    );

    Ok(ScreeningOutcome {
        id: id.to_string(),
        kind,
        score,
        label,
        stats,
        created_at,
    })
}

/// Fetches screening history, newest first.
pub fn fetch_history(conn: &Connection, limit: u32) -> Result<Vec<ScreeningRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, score, label, total_time, path_length, velocity_sd, created_at
         FROM screenings
         ORDER BY created_at DESC, id ASC
         LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit], map_record_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// The most recent screening, if any.
pub fn latest(conn: &Connection) -> Result<Option<ScreeningRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, score, label, total_time, path_length, velocity_sd, created_at
         FROM screenings
         ORDER BY created_at DESC, id ASC
         LIMIT 1",
    )?;
    let record = stmt.query_row([], map_record_row).optional()?;
    Ok(record)
}

fn map_record_row(row: &rusqlite::Row<'_>) -> Result<ScreeningRecord, rusqlite::Error> {
    Ok(ScreeningRecord {
        id: row
            .get::<_, String>(0)?
            .parse()
            .unwrap_or_else(|_| Uuid::nil()),
        kind: row
            .get::<_, String>(1)?
            .parse()
            .unwrap_or(TestKind::Spiral),
        score: row.get::<_, f64>(2)? as f32,
        label: row
            .get::<_, String>(3)?
            .parse()
            .unwrap_or(RiskLabel::AtRisk),
        total_time: row.get(4)?,
        path_length: row.get(5)?,
        velocity_sd: row.get(6)?,
        created_at: row.get(7)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{FixedScoreModel, UnavailableModel};
    use crate::db::sqlite::open_memory_database;

    fn wave_drawing() -> Drawing {
        Drawing {
            strokes: vec![Stroke {
                points: (0..20)
                    .map(|i| StrokePoint {
                        x: i as f64 * 10.0,
                        y: (i as f64 / 3.0).sin() * 40.0,
                        time_offset: i as f64 * 0.05,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn healthy_score_yields_not_at_risk() {
        let conn = open_memory_database().unwrap();
        let model = FixedScoreModel::new(0.9);
        let outcome = run_screening(&conn, &model, TestKind::Wave, &wave_drawing()).unwrap();
        assert_eq!(outcome.label, RiskLabel::NotAtRisk);
        assert!(outcome.stats.total_time > 0.0);
        assert!(outcome.stats.path_length > 0.0);
    }

    #[test]
    fn low_score_yields_at_risk() {
        let conn = open_memory_database().unwrap();
        let model = FixedScoreModel::new(0.2);
        let outcome = run_screening(&conn, &model, TestKind::Spiral, &wave_drawing()).unwrap();
        assert_eq!(outcome.label, RiskLabel::AtRisk);
    }

    #[test]
    fn outcome_is_persisted() {
        let conn = open_memory_database().unwrap();
        let model = FixedScoreModel::new(0.7);
        let outcome = run_screening(&conn, &model, TestKind::Wave, &wave_drawing()).unwrap();

        let history = fetch_history(&conn, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id.to_string(), outcome.id);
        assert_eq!(history[0].kind, TestKind::Wave);
        assert_eq!(history[0].label, RiskLabel::NotAtRisk);
    }

    #[test]
    fn classifier_failure_surfaces_and_persists_nothing() {
        let conn = open_memory_database().unwrap();
        let model = UnavailableModel::new("no model bundled");

        let result = run_screening(&conn, &model, TestKind::Wave, &wave_drawing());
        assert!(matches!(result, Err(ScreeningError::Classifier(_))));

        assert!(fetch_history(&conn, 10).unwrap().is_empty());
    }

    #[test]
    fn history_is_limited() {
        let conn = open_memory_database().unwrap();
        let model = FixedScoreModel::new(0.7);
        for _ in 0..5 {
            run_screening(&conn, &model, TestKind::Spiral, &wave_drawing()).unwrap();
        }
        assert_eq!(fetch_history(&conn, 3).unwrap().len(), 3);
    }

    #[test]
    fn latest_returns_none_when_empty() {
        let conn = open_memory_database().unwrap();
        assert!(latest(&conn).unwrap().is_none());
    }

    #[test]
    fn latest_returns_a_record_after_a_run() {
        let conn = open_memory_database().unwrap();
        let model = FixedScoreModel::new(0.3);
        run_screening(&conn, &model, TestKind::Spiral, &wave_drawing()).unwrap();
        let record = latest(&conn).unwrap().unwrap();
        assert_eq!(record.label, RiskLabel::AtRisk);
    }
}
