//! Deterministic hand-shape synthesis.
//!
//! Builds a full 21-landmark hand whose derived finger states equal a
//! requested pattern.  The simulator plays these back in place of a real
//! detector, and the classifier tests use them as regression fixtures —
//! both therefore exercise the genuine landmark → pattern → rule path
//! rather than short-circuiting at the pattern level.

use crate::fingers::{FingerPattern, FINGER_JOINTS};
use crate::landmark::{
    Landmark, LandmarkSet, INDEX_DIP, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_DIP, MIDDLE_PIP,
    MIDDLE_TIP, PINKY_DIP, PINKY_PIP, PINKY_TIP, RING_DIP, RING_PIP, RING_TIP, THUMB_CMC, WRIST,
};
use crate::rules::RULES;

/// Digit columns across the frame, thumb to pinky.
const COLUMNS: [f32; 5] = [0.30, 0.40, 0.48, 0.56, 0.64];

const MCP_Y: f32 = 0.62;
const PIP_Y: f32 = 0.54;
/// An extended tip sits a full segment above the proximal joint...
const TIP_EXTENDED_Y: f32 = 0.44;
/// ...a retracted tip folds back right next to it.
const TIP_RETRACTED: (f32, f32) = (0.015, 0.55);

fn midpoint(a: Landmark, b: Landmark) -> Landmark {
    Landmark::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.z + b.z) / 2.0)
}

/// Build a hand whose derived [`FingerPattern`] equals `pattern`.
pub fn hand_with(pattern: FingerPattern) -> LandmarkSet {
    let mut hand: LandmarkSet = [Landmark::default(); LANDMARK_COUNT];
    hand[WRIST] = Landmark::new(0.50, 0.92, 0.0);
    hand[THUMB_CMC] = Landmark::new(0.38, 0.80, 0.0);

    for (state, (&joints, &x)) in pattern
        .as_array()
        .iter()
        .zip(FINGER_JOINTS.iter().zip(COLUMNS.iter()))
    {
        hand[joints.mcp] = Landmark::new(x, MCP_Y, 0.0);
        hand[joints.pip] = Landmark::new(x, PIP_Y, 0.0);
        hand[joints.tip] = if *state {
            Landmark::new(x, TIP_EXTENDED_Y, 0.0)
        } else {
            Landmark::new(x + TIP_RETRACTED.0, TIP_RETRACTED.1, 0.0)
        };
    }

    // Distal joints are not consulted by the extension test; fill them in
    // so the set stays a plausible, fully-populated hand.
    for (pip, dip, tip) in [
        (INDEX_PIP, INDEX_DIP, INDEX_TIP),
        (MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP),
        (RING_PIP, RING_DIP, RING_TIP),
        (PINKY_PIP, PINKY_DIP, PINKY_TIP),
    ] {
        hand[dip] = midpoint(hand[pip], hand[tip]);
    }

    hand
}

/// Build a hand for a letter, using the first rule that names it.
/// Letters outside the table yield `None`.
pub fn hand_for(letter: char) -> Option<LandmarkSet> {
    RULES
        .iter()
        .find(|r| r.letter == letter.to_ascii_uppercase())
        .map(|r| hand_with(r.pattern))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::classify;

    #[test]
    fn synthesized_letters_classify_back() {
        // Only priority winners can round-trip; shadowed rows resolve to
        // their winner instead.
        for (letter, expect) in [('A', 'A'), ('B', 'B'), ('C', 'E'), ('V', 'U'), ('S', 'E')] {
            let hand = hand_for(letter).unwrap();
            assert_eq!(classify(Some(&hand)).letter, Some(expect));
        }
    }

    #[test]
    fn unknown_letter_has_no_fixture() {
        assert!(hand_for('Q').is_none());
        assert!(hand_for('#').is_none());
    }

    #[test]
    fn lower_case_letters_resolve() {
        assert!(hand_for('y').is_some());
    }

    #[test]
    fn synthesized_coordinates_stay_normalized() {
        let hand = hand_with(FingerPattern::new(true, true, true, true, true));
        for lm in hand.iter() {
            assert!((0.0..=1.0).contains(&lm.x));
            assert!((0.0..=1.0).contains(&lm.y));
        }
    }
}
