//! Risk classifier invocation.
//!
//! Wraps the bundled pre-trained binary classifiers (one per test kind,
//! consumed as opaque ONNX artifacts — no training or architecture here)
//! behind a synchronous `RiskModel` trait. The model's scalar output is
//! thresholded at 0.5 into a risk label; above the threshold the model
//! saw a healthy drawing.
//!
//! Inference failures are never swallowed: every error path returns a
//! typed `ClassifierError` the caller must handle.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::enums::RiskLabel;
use crate::screening::raster::Raster;

/// Fixed decision threshold on the model's scalar output.
pub const RISK_THRESHOLD: f32 = 0.5;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Model file not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    BadOutput(String),

    #[error("No classifier available: {0}")]
    Unavailable(String),
}

/// A pre-trained binary risk classifier over the fixed-size raster.
pub trait RiskModel: Send + Sync {
    /// Raw scalar output for one raster (probability-like, higher means
    /// healthier).
    fn predict(&self, raster: &Raster) -> Result<f32, ClassifierError>;
}

/// Derive the risk label from a model score. Strictly above the
/// threshold reads as not at risk; the boundary itself is at risk.
pub fn classify(score: f32) -> RiskLabel {
    if score > RISK_THRESHOLD {
        RiskLabel::NotAtRisk
    } else {
        RiskLabel::AtRisk
    }
}

// ═══════════════════════════════════════════════════════════
// ONNX model — behind `onnx-classifier` feature
// ═══════════════════════════════════════════════════════════

#[cfg(feature = "onnx-classifier")]
mod onnx {
    use std::path::Path;
    use std::sync::Mutex;

    use ort::session::Session;

    use super::{ClassifierError, Raster, RiskModel};
    use crate::screening::raster::RASTER_SIZE;

    /// Real classifier using ONNX Runtime.
    ///
    /// Expects a model taking a 1×128×128×1 f32 tensor and producing a
    /// single probability-like scalar as its first output.
    ///
    /// Uses interior mutability (Mutex) because ort::Session::run requires
    /// `&mut self` but `RiskModel` exposes `&self` for shared usage.
    pub struct OnnxRiskModel {
        session: Mutex<Session>,
    }

    impl OnnxRiskModel {
        /// Load a classifier from an `.onnx` file.
        pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
            if !model_path.exists() {
                return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
            }

            let session = Session::builder()
                .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
                .with_intra_threads(2)
                .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
                .commit_from_file(model_path)
                .map_err(|e: ort::Error| {
                    ClassifierError::ModelInit(format!("ONNX load failed: {e}"))
                })?;

            tracing::info!("Risk classifier loaded from {}", model_path.display());

            Ok(Self {
                session: Mutex::new(session),
            })
        }
    }

    impl RiskModel for OnnxRiskModel {
        fn predict(&self, raster: &Raster) -> Result<f32, ClassifierError> {
            use ort::value::TensorRef;

            let side = RASTER_SIZE as usize;
            let input = ndarray::Array4::from_shape_vec(
                (1, side, side, 1),
                raster.pixels().to_vec(),
            )
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

            let tensor = TensorRef::from_array_view(&input)
                .map_err(|e| ClassifierError::Inference(e.to_string()))?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| ClassifierError::Inference("Session lock poisoned".to_string()))?;

            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

            let (shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ClassifierError::BadOutput(format!("Output extraction: {e}")))?;

            data.first().copied().ok_or_else(|| {
                ClassifierError::BadOutput(format!("Empty output tensor, shape {shape:?}"))
            })
        }
    }
}

#[cfg(feature = "onnx-classifier")]
pub use onnx::OnnxRiskModel;

/// Placeholder when no classifier is wired up (built without the
/// `onnx-classifier` feature, or the model file is absent). Every
/// prediction fails loudly instead of producing a silent empty result.
pub struct UnavailableModel {
    reason: String,
}

impl UnavailableModel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RiskModel for UnavailableModel {
    fn predict(&self, _raster: &Raster) -> Result<f32, ClassifierError> {
        Err(ClassifierError::Unavailable(self.reason.clone()))
    }
}

/// One classifier per test kind (the app bundles separate spiral and
/// wave models).
pub struct ModelRegistry {
    spiral: Box<dyn RiskModel>,
    wave: Box<dyn RiskModel>,
}

impl ModelRegistry {
    pub fn new(spiral: Box<dyn RiskModel>, wave: Box<dyn RiskModel>) -> Self {
        Self { spiral, wave }
    }

    pub fn for_kind(&self, kind: crate::models::enums::TestKind) -> &dyn RiskModel {
        use crate::models::enums::TestKind;
        match kind {
            TestKind::Spiral => self.spiral.as_ref(),
            TestKind::Wave => self.wave.as_ref(),
        }
    }

    /// Loads `spiral.onnx` and `wave.onnx` from the models directory.
    /// A model that fails to load is replaced by an `UnavailableModel`
    /// whose predictions fail loudly, so one broken artifact never takes
    /// the other test down.
    #[cfg(feature = "onnx-classifier")]
    pub fn from_models_dir(dir: &std::path::Path) -> Self {
        let load = |file: &str| -> Box<dyn RiskModel> {
            let path = dir.join(file);
            match OnnxRiskModel::load(&path) {
                Ok(model) => Box::new(model),
                Err(e) => {
                    tracing::warn!("Could not load {}: {e}", path.display());
                    Box::new(UnavailableModel::new(format!(
                        "classifier {file} unavailable: {e}"
                    )))
                }
            }
        };
        Self::new(load("spiral.onnx"), load("wave.onnx"))
    }

    #[cfg(not(feature = "onnx-classifier"))]
    pub fn from_models_dir(_dir: &std::path::Path) -> Self {
        const REASON: &str = "built without the onnx-classifier feature";
        Self::new(
            Box::new(UnavailableModel::new(REASON)),
            Box::new(UnavailableModel::new(REASON)),
        )
    }
}

/// Deterministic model for testing — always returns the same score.
pub struct FixedScoreModel {
    score: f32,
}

impl FixedScoreModel {
    pub fn new(score: f32) -> Self {
        Self { score }
    }
}

impl RiskModel for FixedScoreModel {
    fn predict(&self, _raster: &Raster) -> Result<f32, ClassifierError> {
        Ok(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::raster::rasterize;
    use crate::screening::stroke::Drawing;

    #[test]
    fn label_flips_just_above_threshold() {
        assert_eq!(classify(0.51), RiskLabel::NotAtRisk);
        assert_eq!(classify(0.500001), RiskLabel::NotAtRisk);
    }

    #[test]
    fn boundary_and_below_read_at_risk() {
        assert_eq!(classify(0.5), RiskLabel::AtRisk);
        assert_eq!(classify(0.49), RiskLabel::AtRisk);
        assert_eq!(classify(0.0), RiskLabel::AtRisk);
    }

    #[test]
    fn extremes_classify_sanely() {
        assert_eq!(classify(1.0), RiskLabel::NotAtRisk);
        assert_eq!(classify(f32::MIN), RiskLabel::AtRisk);
    }

    #[test]
    fn fixed_score_model_returns_its_score() {
        let raster = rasterize(&Drawing { strokes: vec![] });
        let model = FixedScoreModel::new(0.8);
        assert_eq!(model.predict(&raster).unwrap(), 0.8);
    }

    #[test]
    fn unavailable_model_surfaces_error() {
        let raster = rasterize(&Drawing { strokes: vec![] });
        let model = UnavailableModel::new("no model bundled");
        let err = model.predict(&raster).unwrap_err();
        assert!(matches!(err, ClassifierError::Unavailable(_)));
    }
}
