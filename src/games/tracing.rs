//! Photo tracing game support.
//!
//! The player picks a photo, the app reduces it to a line-overlay
//! outline to trace over, and the canvas session tracks strokes with
//! clear/undo/redo. Outline preparation is grayscale → Sobel gradient
//! magnitude → threshold, rendered as dark lines on white.

use image::imageops::{self, FilterType};
use image::{GrayImage, ImageFormat, Luma};
use thiserror::Error;

use crate::screening::stroke::Stroke;

/// Gradient magnitude above this reads as an edge.
pub const EDGE_THRESHOLD: u32 = 80;

/// Photos larger than this are downscaled before edge detection.
const MAX_PHOTO_DIM: u32 = 1024;

const BACKGROUND: u8 = 255;
const LINE: u8 = 0;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image encode failed: {0}")]
    Encode(String),
}

/// Builds a traceable outline from an encoded photo (JPEG or PNG).
/// Returns PNG bytes: dark edge lines on a white background.
pub fn prepare_outline(image_bytes: &[u8]) -> Result<Vec<u8>, OutlineError> {
    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| OutlineError::Decode(e.to_string()))?;
    let mut gray = decoded.to_luma8();

    if gray.width() > MAX_PHOTO_DIM || gray.height() > MAX_PHOTO_DIM {
        let (w, h) = (gray.width() as f64, gray.height() as f64);
        let scale = f64::from(MAX_PHOTO_DIM) / w.max(h);
        gray = imageops::resize(
            &gray,
            (w * scale).round().max(1.0) as u32,
            (h * scale).round().max(1.0) as u32,
            FilterType::Triangle,
        );
    }

    let outline = line_overlay(&gray);

    let mut bytes = Vec::new();
    outline
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| OutlineError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Sobel gradient magnitude, thresholded into dark-on-white lines.
fn line_overlay(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    let mut out = GrayImage::from_pixel(w, h, Luma([BACKGROUND]));
    if w < 3 || h < 3 {
        return out;
    }

    let luma = |x: u32, y: u32| i32::from(gray.get_pixel(x, y).0[0]);

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let gx = -luma(x - 1, y - 1) + luma(x + 1, y - 1) - 2 * luma(x - 1, y)
                + 2 * luma(x + 1, y)
                - luma(x - 1, y + 1)
                + luma(x + 1, y + 1);
            let gy = -luma(x - 1, y - 1) - 2 * luma(x, y - 1) - luma(x + 1, y - 1)
                + luma(x - 1, y + 1)
                + 2 * luma(x, y + 1)
                + luma(x + 1, y + 1);
            let magnitude = ((gx * gx + gy * gy) as f64).sqrt() as u32;
            if magnitude > EDGE_THRESHOLD {
                out.put_pixel(x, y, Luma([LINE]));
            }
        }
    }
    out
}

/// One tracing round: the outline being traced plus the player's strokes,
/// with clear (keeps the outline), undo and redo.
#[derive(Debug, Default)]
pub struct TracingSession {
    outline: Option<Vec<u8>>,
    strokes: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
}

impl TracingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_outline(&mut self, outline_png: Vec<u8>) {
        self.outline = Some(outline_png);
    }

    pub fn outline(&self) -> Option<&[u8]> {
        self.outline.as_deref()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// A new stroke invalidates the redo history.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.redo_stack.clear();
    }

    /// Removes the latest stroke. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        match self.strokes.pop() {
            Some(stroke) => {
                self.redo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Restores the latest undone stroke.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Wipes the canvas but keeps the outline photo.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.redo_stack.clear();
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::stroke::StrokePoint;

    fn stroke_at(x: f64) -> Stroke {
        Stroke {
            points: vec![StrokePoint { x, y: 0.0, time_offset: 0.0 }],
        }
    }

    fn half_black_png(w: u32, h: u32) -> Vec<u8> {
        let img = GrayImage::from_fn(w, h, |x, _| {
            if x < w / 2 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    // ───────────────────────────────────────
    // outline tests
    // ───────────────────────────────────────

    #[test]
    fn outline_marks_the_contrast_boundary() {
        let png = half_black_png(64, 64);
        let outline_bytes = prepare_outline(&png).unwrap();

        let outline = image::load_from_memory(&outline_bytes).unwrap().to_luma8();
        assert_eq!(outline.dimensions(), (64, 64));

        // Edge pixels cluster around the vertical boundary at x = 32.
        let edge_pixels: Vec<u32> = (0..64u32)
            .flat_map(|y| (0..64u32).map(move |x| (x, y)))
            .filter(|&(x, y)| outline.get_pixel(x, y).0[0] == 0)
            .map(|(x, _)| x)
            .collect();
        assert!(!edge_pixels.is_empty());
        assert!(edge_pixels.iter().all(|&x| (30..=34).contains(&x)));
    }

    #[test]
    fn flat_image_yields_no_lines() {
        let img = GrayImage::from_pixel(32, 32, Luma([128u8]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let outline_bytes = prepare_outline(&bytes).unwrap();
        let outline = image::load_from_memory(&outline_bytes).unwrap().to_luma8();
        assert!(outline.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn oversized_photo_is_downscaled() {
        let png = half_black_png(2048, 512);
        let outline_bytes = prepare_outline(&png).unwrap();
        let outline = image::load_from_memory(&outline_bytes).unwrap().to_luma8();
        let (w, h) = outline.dimensions();
        assert!(w <= 1024 && h <= 1024);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = prepare_outline(b"not an image");
        assert!(matches!(result, Err(OutlineError::Decode(_))));
    }

    // ───────────────────────────────────────
    // session tests
    // ───────────────────────────────────────

    #[test]
    fn undo_then_redo_round_trips() {
        let mut session = TracingSession::new();
        session.add_stroke(stroke_at(1.0));
        session.add_stroke(stroke_at(2.0));

        assert!(session.undo());
        assert_eq!(session.strokes().len(), 1);
        assert!(session.redo());
        assert_eq!(session.strokes().len(), 2);
        assert_eq!(session.strokes()[1].points[0].x, 2.0);
    }

    #[test]
    fn new_stroke_clears_redo_history() {
        let mut session = TracingSession::new();
        session.add_stroke(stroke_at(1.0));
        session.undo();
        session.add_stroke(stroke_at(3.0));
        assert!(!session.redo());
    }

    #[test]
    fn undo_on_empty_canvas_is_noop() {
        let mut session = TracingSession::new();
        assert!(!session.undo());
        assert!(!session.redo());
    }

    #[test]
    fn clear_keeps_the_outline() {
        let mut session = TracingSession::new();
        session.set_outline(vec![1, 2, 3]);
        session.add_stroke(stroke_at(1.0));
        session.clear();

        assert!(session.strokes().is_empty());
        assert!(!session.redo());
        assert_eq!(session.outline(), Some(&[1u8, 2, 3][..]));
    }
}
