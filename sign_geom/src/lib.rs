//! # sign_geom
//!
//! Deterministic geometry for single-hand finger-spelling recognition.
//!
//! The input is one detected hand as 21 ordered, normalized 3-D landmarks
//! (the canonical wrist-first layout used by common hand trackers).  From
//! those we derive a boolean extended/retracted state per finger, then map
//! the five-finger pattern to a letter through an ordered rule table.
//!
//! Everything in this crate is a pure function of its input: no hidden
//! state, no per-frame memory, fully reproducible.
//!
//! ## Pipeline
//!
//! ```text
//! LandmarkSet ──▶ FingerPattern ──▶ first matching Rule ──▶ Classification
//! ```
//!
//! The rule table intentionally contains duplicate patterns inherited from
//! the hand-shape alphabet (C and S share E's all-retracted pattern, V
//! shares U's index+middle pattern).  Evaluation order is fixed and the
//! first match wins; the shadowed rows stay in the table as documentation
//! of the ambiguity.

pub mod landmark;
pub mod fingers;
pub mod rules;
pub mod synth;

pub use landmark::{Landmark, LandmarkSet, flatten, LANDMARK_COUNT, FEATURE_COUNT};
pub use fingers::{FingerPattern, FingerJoints, FINGER_JOINTS};
pub use rules::{Classification, Rule, RULES, classify, classify_pattern};
