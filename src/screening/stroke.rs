//! Stroke capture types for the tracing tests.

use serde::{Deserialize, Serialize};

/// One sampled pen position. `time_offset` is seconds since the stroke
/// began and is monotonic within a stroke.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub time_offset: f64,
}

/// One continuous pen-down-to-pen-up gesture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
}

/// A completed freehand drawing: strokes in the order they were drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    pub strokes: Vec<Stroke>,
}

/// Axis-aligned bounding box of a drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Drawing {
    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(|s| s.points.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }

    /// Bounding box over all points, `None` for an empty drawing.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.strokes.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }
}
