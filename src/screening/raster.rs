//! Drawing rasterization for classifier input.
//!
//! Renders a drawing the way the capture canvas displays it (dark ink,
//! pen width 5, white background), recentered on its bounding box, then
//! Lanczos-resized to a fixed 128×128 single-channel raster. Output
//! dimensions never depend on the input bounding box.

use image::imageops::{self, FilterType};
use image::GrayImage;

use super::stroke::Drawing;

/// Classifier input edge length (the bundled models take 1×128×128×1).
pub const RASTER_SIZE: u32 = 128;

/// Pen stroke width at native resolution.
pub const PEN_WIDTH: f64 = 5.0;

/// Background luminance (white) and ink luminance.
const BACKGROUND: u8 = 255;
const INK: u8 = 0;

/// Cap on the intermediate render canvas; larger drawings are scaled
/// down first (the result is resized to 128×128 regardless).
const MAX_CANVAS: f64 = 1024.0;

/// Fixed-size single-channel raster, row-major luminance 0..=255.
#[derive(Debug, Clone)]
pub struct Raster {
    pixels: Vec<f32>,
}

impl Raster {
    pub fn width(&self) -> u32 {
        RASTER_SIZE
    }

    pub fn height(&self) -> u32 {
        RASTER_SIZE
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.pixels[(y * RASTER_SIZE + x) as usize]
    }

    fn uniform(value: u8) -> Self {
        Self {
            pixels: vec![value as f32; (RASTER_SIZE * RASTER_SIZE) as usize],
        }
    }
}

/// Rasterizes a drawing to the fixed classifier resolution. An empty
/// drawing produces a uniform background raster.
pub fn rasterize(drawing: &Drawing) -> Raster {
    let Some(bounds) = drawing.bounds() else {
        return Raster::uniform(BACKGROUND);
    };

    // Scale oversized drawings down before stamping pixels.
    let max_dim = bounds.width().max(bounds.height()).max(1.0);
    let scale = (MAX_CANVAS / max_dim).min(1.0);

    let margin = PEN_WIDTH;
    let canvas_w = (bounds.width() * scale + 2.0 * margin).ceil().max(1.0) as u32;
    let canvas_h = (bounds.height() * scale + 2.0 * margin).ceil().max(1.0) as u32;

    let mut canvas = GrayImage::from_pixel(canvas_w, canvas_h, image::Luma([BACKGROUND]));

    let to_canvas = |x: f64, y: f64| {
        (
            (x - bounds.min_x) * scale + margin,
            (y - bounds.min_y) * scale + margin,
        )
    };

    for stroke in &drawing.strokes {
        match stroke.points.as_slice() {
            [] => {}
            [only] => {
                let (cx, cy) = to_canvas(only.x, only.y);
                stamp(&mut canvas, cx, cy);
            }
            points => {
                for pair in points.windows(2) {
                    let (x0, y0) = to_canvas(pair[0].x, pair[0].y);
                    let (x1, y1) = to_canvas(pair[1].x, pair[1].y);
                    stamp_segment(&mut canvas, x0, y0, x1, y1);
                }
            }
        }
    }

    let resized = imageops::resize(&canvas, RASTER_SIZE, RASTER_SIZE, FilterType::Lanczos3);
    Raster {
        pixels: resized.pixels().map(|p| p.0[0] as f32).collect(),
    }
}

/// Stamps ink discs along a segment at sub-pixel steps.
fn stamp_segment(canvas: &mut GrayImage, x0: f64, y0: f64, x1: f64, y1: f64) {
    let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    let steps = length.ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        stamp(canvas, x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
    }
}

/// Stamps one ink disc of radius PEN_WIDTH/2 centered at (cx, cy).
fn stamp(canvas: &mut GrayImage, cx: f64, cy: f64) {
    let radius = PEN_WIDTH / 2.0;
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let x_lo = (cx - radius).floor() as i64;
    let x_hi = (cx + radius).ceil() as i64;
    let y_lo = (cy - radius).floor() as i64;
    let y_hi = (cy + radius).ceil() as i64;
    for py in y_lo.max(0)..=y_hi.min(h - 1) {
        for px in x_lo.max(0)..=x_hi.min(w - 1) {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                canvas.put_pixel(px as u32, py as u32, image::Luma([INK]));
            }
        }
    }
}
