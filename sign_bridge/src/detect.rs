//! The detector seam and the scripted stand-in.
//!
//! Camera acquisition and the landmark detector are external
//! collaborators; the bridge only requires something that can hand over
//! one observation per frame.  The shipped implementation plays back a
//! letter script as synthesized canonical hand shapes, which is how the
//! bridge runs without any hardware at all.

use std::collections::VecDeque;

use tracing::warn;

use sign_geom::{synth, LandmarkSet};

// ════════════════════════════════════════════════════════════════════════════
// HandSource
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame supplier of hand observations.
pub trait HandSource {
    /// Outer `None`: the source is exhausted (end of capture) — the only
    /// irrecoverable condition in the system.  Inner `None`: no hand was
    /// detected this frame, which is perfectly ordinary.
    fn next_frame(&mut self) -> Option<Option<LandmarkSet>>;
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource
// ════════════════════════════════════════════════════════════════════════════

/// Plays a fixed frame sequence, then reports exhaustion.
pub struct ScriptedSource {
    frames: VecDeque<Option<LandmarkSet>>,
}

impl ScriptedSource {
    /// Build from a letter script.  Each letter is held for `dwell`
    /// frames with `gap` empty frames in front of it, the way a signer
    /// holds a shape between transitions.  Letters without a rule-table
    /// shape become empty frames (and a warning).
    pub fn from_letters(script: &str, dwell: usize, gap: usize) -> Self {
        let mut frames = VecDeque::new();
        for letter in script.chars().filter(|c| !c.is_whitespace()) {
            for _ in 0..gap {
                frames.push_back(None);
            }
            match synth::hand_for(letter) {
                Some(hand) => {
                    for _ in 0..dwell.max(1) {
                        frames.push_back(Some(hand));
                    }
                }
                None => {
                    warn!(%letter, "no hand shape for scripted letter; inserting empty frame");
                    frames.push_back(None);
                }
            }
        }
        ScriptedSource { frames }
    }

    /// Raw frame list, for tests that need exact control.
    pub fn from_frames(frames: Vec<Option<LandmarkSet>>) -> Self {
        ScriptedSource { frames: frames.into() }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl HandSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<Option<LandmarkSet>> {
        self.frames.pop_front()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use sign_geom::classify;

    #[test]
    fn script_frames_classify_back_to_their_letters() {
        let mut source = ScriptedSource::from_letters("AB", 1, 0);
        let a = source.next_frame().unwrap();
        assert!(classify(a.as_ref()).is_letter('A'));
        let b = source.next_frame().unwrap();
        assert!(classify(b.as_ref()).is_letter('B'));
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn dwell_and_gap_shape_the_frame_stream() {
        let mut source = ScriptedSource::from_letters("A", 3, 2);
        assert_eq!(source.remaining(), 5);
        assert_eq!(source.next_frame(), Some(None));
        assert_eq!(source.next_frame(), Some(None));
        for _ in 0..3 {
            let f = source.next_frame().unwrap();
            assert!(f.is_some());
        }
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn unshaped_letters_become_empty_frames() {
        let mut source = ScriptedSource::from_letters("Q", 4, 0);
        assert_eq!(source.next_frame(), Some(None));
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn whitespace_in_scripts_is_skipped() {
        let source = ScriptedSource::from_letters("C A T", 1, 0);
        assert_eq!(source.remaining(), 3);
    }

    #[test]
    fn exhausted_source_stays_exhausted() {
        let mut source = ScriptedSource::from_frames(vec![]);
        assert!(source.next_frame().is_none());
        assert!(source.next_frame().is_none());
    }
}
