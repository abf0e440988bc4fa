//! The predictor capability seam.

use sign_geom::Classification;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("feature vector has width {got}, model wants {want}")]
    BadInput { got: usize, want: usize },
    #[error("forward pass failed: {0}")]
    Forward(#[from] candle_core::Error),
}

/// Anything that can turn a flattened landmark feature vector into a
/// letter with a probability.  Implementations must be pure per call —
/// the selector may consult one every frame.
pub trait LetterPredictor: Send {
    fn predict(&self, features: &[f32]) -> Result<Classification, PredictError>;
}
