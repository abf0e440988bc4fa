//! # sign_model
//!
//! The optional learned letter predictor and the strategy selector that
//! composes it with the geometric rule table.
//!
//! The predictor is a black box behind [`LetterPredictor`]: flattened
//! landmark coordinates in, letter + probability out.  When a model
//! bundle is configured and loads, its answer is authoritative; any
//! per-frame inference failure falls back — for that frame only — to the
//! geometry classifier.  A bundle that fails to *load* disables the
//! learned path for the whole session without aborting startup.

pub mod learned;
pub mod predictor;
pub mod selector;

pub use learned::{LearnedPredictor, LoadError, ModelMeta};
pub use predictor::{LetterPredictor, PredictError};
pub use selector::Selector;
