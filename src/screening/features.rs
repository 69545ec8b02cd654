//! Kinematic statistics over a completed drawing.
//!
//! Three scalars are extracted and shown to the user next to the
//! classifier verdict; they are not part of the model input:
//!
//! - total time: sum of successive inter-point time deltas
//! - path length: sum of Euclidean distances between consecutive points
//! - velocity SD: sample standard deviation (n−1) of distance/delta,
//!   taken only where the delta is nonzero
//!
//! Strokes with fewer than `MIN_STROKE_POINTS` points are excluded from
//! all three (they would make the delta computation degenerate) but are
//! still rendered into the raster.

use serde::{Deserialize, Serialize};

use super::stroke::Drawing;

/// Minimum points for a stroke to contribute to the statistics.
pub const MIN_STROKE_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DrawingStats {
    pub total_time: f64,
    pub path_length: f64,
    pub velocity_sd: f64,
}

/// Extracts the three kinematic scalars from a drawing.
pub fn extract_stats(drawing: &Drawing) -> DrawingStats {
    let mut total_time = 0.0;
    let mut path_length = 0.0;
    let mut velocities: Vec<f64> = Vec::new();

    for stroke in &drawing.strokes {
        if stroke.points.len() < MIN_STROKE_POINTS {
            continue;
        }
        for pair in stroke.points.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let dt = cur.time_offset - prev.time_offset;
            total_time += dt;

            let distance = ((cur.x - prev.x).powi(2) + (cur.y - prev.y).powi(2)).sqrt();
            path_length += distance;

            if dt != 0.0 {
                velocities.push(distance / dt);
            }
        }
    }

    DrawingStats {
        total_time,
        path_length,
        velocity_sd: sample_std_dev(&velocities),
    }
}

/// Sample standard deviation (divisor n−1). Fewer than two samples is
/// degenerate and reported as 0.0.
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (sum_sq / (n - 1.0)).sqrt()
}
