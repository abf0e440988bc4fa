//! Learned letter predictor backed by an opaque weights bundle.
//!
//! The bundle is a bincode-serialized `(ModelMeta, Vec<f32>)` pair: the
//! metadata names the letter classes and layer widths, the flat vector
//! carries the two dense layers back to back.  Inference is a plain
//! forward pass — input · W1 → relu → · W2 → softmax — with the arg-max
//! class reported at its probability.

use std::fs;
use std::path::{Path, PathBuf};

use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sign_geom::Classification;

use crate::predictor::{LetterPredictor, PredictError};

// ════════════════════════════════════════════════════════════════════════════
// Bundle format
// ════════════════════════════════════════════════════════════════════════════

/// Metadata half of the bundle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Letter classes in output-column order.
    pub classes: Vec<char>,
    /// Feature width the model was trained on (21 landmarks × 3).
    pub input_dim: usize,
    /// Hidden layer width.
    pub hidden_dim: usize,
}

impl ModelMeta {
    fn weight_count(&self) -> usize {
        self.input_dim * self.hidden_dim + self.hidden_dim * self.classes.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model bundle not found: {0}")]
    Missing(PathBuf),
    #[error("could not read model bundle: {0}")]
    Read(#[source] std::io::Error),
    #[error("malformed model bundle: {0}")]
    Malformed(String),
    #[error("tensor setup failed: {0}")]
    Tensor(#[from] candle_core::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// LearnedPredictor
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct LearnedPredictor {
    meta: ModelMeta,
    w1: Tensor,
    w2: Tensor,
    device: Device,
}

impl LearnedPredictor {
    /// Load a bundle from disk.  Every failure here is a *load* error:
    /// the caller is expected to disable the learned path for the
    /// session rather than abort.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::Missing(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(LoadError::Read)?;
        let (meta, flat): (ModelMeta, Vec<f32>) =
            bincode::deserialize(&bytes).map_err(|e| LoadError::Malformed(e.to_string()))?;

        if meta.classes.is_empty() || meta.input_dim == 0 || meta.hidden_dim == 0 {
            return Err(LoadError::Malformed("empty classes or zero layer width".into()));
        }
        if flat.len() != meta.weight_count() {
            return Err(LoadError::Malformed(format!(
                "weight count {} does not match layout {}",
                flat.len(),
                meta.weight_count()
            )));
        }

        let device = Device::Cpu;
        let split = meta.input_dim * meta.hidden_dim;
        let w1 = Tensor::from_slice(&flat[..split], (meta.input_dim, meta.hidden_dim), &device)?;
        let w2 = Tensor::from_slice(
            &flat[split..],
            (meta.hidden_dim, meta.classes.len()),
            &device,
        )?;

        debug!(
            classes = meta.classes.len(),
            input = meta.input_dim,
            hidden = meta.hidden_dim,
            "model bundle loaded"
        );
        Ok(LearnedPredictor { meta, w1, w2, device })
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Serialize a bundle; the training side of the round trip.
    pub fn encode_bundle(meta: &ModelMeta, weights: &[f32]) -> Result<Vec<u8>, LoadError> {
        bincode::serialize(&(meta, weights)).map_err(|e| LoadError::Malformed(e.to_string()))
    }
}

impl LetterPredictor for LearnedPredictor {
    fn predict(&self, features: &[f32]) -> Result<Classification, PredictError> {
        if features.len() != self.meta.input_dim {
            return Err(PredictError::BadInput {
                got: features.len(),
                want: self.meta.input_dim,
            });
        }

        let x = Tensor::from_slice(features, (1, self.meta.input_dim), &self.device)?;
        let hidden = x.matmul(&self.w1)?.relu()?;
        let logits = hidden.matmul(&self.w2)?;
        let row = logits.to_vec2::<f32>()?.remove(0);

        // Softmax over the single row, then arg-max.
        let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = row.iter().map(|v| (v - max).exp()).collect();
        let total: f32 = exps.iter().sum();

        let (best, weight) = exps
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(bi, bw), (i, &w)| {
                if w > bw { (i, w) } else { (bi, bw) }
            });

        Ok(Classification::letter(self.meta.classes[best], weight / total))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_bundle(meta: &ModelMeta, weights: &[f32]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&LearnedPredictor::encode_bundle(meta, weights).unwrap())
            .unwrap();
        file
    }

    /// Two classes, identity-ish weights: feature 0 votes A, feature 1
    /// votes B.
    fn two_class_meta() -> ModelMeta {
        ModelMeta { classes: vec!['A', 'B'], input_dim: 2, hidden_dim: 2 }
    }

    fn two_class_weights() -> Vec<f32> {
        // W1 = identity, W2 = identity.
        vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]
    }

    #[test]
    fn missing_bundle_is_a_load_error() {
        let err = LearnedPredictor::load(Path::new("/definitely/not/here.bin")).unwrap_err();
        assert!(matches!(err, LoadError::Missing(_)));
    }

    #[test]
    fn garbage_bytes_are_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a bundle at all").unwrap();
        let err = LearnedPredictor::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn wrong_weight_count_is_malformed() {
        let file = write_bundle(&two_class_meta(), &[1.0, 2.0, 3.0]);
        let err = LearnedPredictor::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn forward_pass_picks_the_dominant_class() {
        let file = write_bundle(&two_class_meta(), &two_class_weights());
        let model = LearnedPredictor::load(file.path()).unwrap();

        let a = model.predict(&[4.0, 0.0]).unwrap();
        assert_eq!(a.letter, Some('A'));
        assert!(a.confidence > 0.9);

        let b = model.predict(&[0.0, 4.0]).unwrap();
        assert_eq!(b.letter, Some('B'));
        assert!(b.confidence > 0.9);
    }

    #[test]
    fn probabilities_stay_in_unit_interval() {
        let file = write_bundle(&two_class_meta(), &two_class_weights());
        let model = LearnedPredictor::load(file.path()).unwrap();
        let got = model.predict(&[0.3, 0.3]).unwrap();
        assert!((0.0..=1.0).contains(&got.confidence));
    }

    #[test]
    fn wrong_feature_width_is_a_predict_error() {
        let file = write_bundle(&two_class_meta(), &two_class_weights());
        let model = LearnedPredictor::load(file.path()).unwrap();
        let err = model.predict(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, PredictError::BadInput { got: 3, want: 2 }));
    }
}
