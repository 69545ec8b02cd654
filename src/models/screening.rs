use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{RiskLabel, TestKind};

/// A persisted screening outcome (one tracing test run).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub id: Uuid,
    pub kind: TestKind,
    /// Raw model output the label was derived from.
    pub score: f32,
    pub label: RiskLabel,
    pub total_time: f64,
    pub path_length: f64,
    pub velocity_sd: f64,
    pub created_at: String,
}
