//! Classification strategy selector.
//!
//! Learned predictor first when one is configured; the geometric rule
//! table otherwise, and as the per-frame fallback whenever the learned
//! path fails on a frame.  The selector never mutates a landmark set or
//! a result — it only chooses which computed result to return.

use std::path::Path;

use tracing::{debug, info, warn};

use sign_geom::{flatten, rules, Classification, LandmarkSet};

use crate::learned::LearnedPredictor;
use crate::predictor::LetterPredictor;

pub struct Selector {
    learned: Option<Box<dyn LetterPredictor>>,
}

impl Selector {
    /// Geometry-rule classification only.
    pub fn geometry_only() -> Self {
        Selector { learned: None }
    }

    /// Try to load a model bundle.  A load failure permanently disables
    /// the learned path for this session and is not fatal: the selector
    /// comes up in geometry-only mode.
    pub fn with_model(path: &Path) -> Self {
        match LearnedPredictor::load(path) {
            Ok(model) => {
                info!(
                    path = %path.display(),
                    classes = model.meta().classes.len(),
                    "learned predictor active"
                );
                Selector { learned: Some(Box::new(model)) }
            }
            Err(e) => {
                warn!("learned predictor disabled ({e}); geometry rules only");
                Selector { learned: None }
            }
        }
    }

    /// Wrap an already-built predictor (tests, alternative backends).
    pub fn from_predictor(predictor: Box<dyn LetterPredictor>) -> Self {
        Selector { learned: Some(predictor) }
    }

    pub fn has_learned(&self) -> bool {
        self.learned.is_some()
    }

    /// Classify one frame.  No hand short-circuits to the sentinel; a
    /// learned failure falls back for this frame only.
    pub fn classify(&self, hand: Option<&LandmarkSet>) -> Classification {
        let Some(hand) = hand else {
            return Classification::none(0.0);
        };

        if let Some(model) = &self.learned {
            match model.predict(&flatten(hand)) {
                Ok(result) => return result,
                Err(e) => {
                    debug!("learned predictor failed for this frame ({e}); using geometry")
                }
            }
        }

        rules::classify(Some(hand))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
