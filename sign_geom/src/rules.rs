//! The ordered letter rule table and the classifier built on it.
//!
//! Rules are evaluated top-to-bottom and the first matching pattern wins.
//! The table deliberately keeps its inherited duplicate rows: C and S
//! carry the same all-retracted pattern as E, and V the same
//! index+middle pattern as U.  Those rows can never win — priority order
//! is the resolution, and the regression tests pin it down.

use crate::fingers::FingerPattern;
use crate::landmark::LandmarkSet;

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

/// Result of classifying one frame: a letter (or the "none" sentinel)
/// with a confidence in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub letter: Option<char>,
    pub confidence: f32,
}

impl Classification {
    pub const fn letter(letter: char, confidence: f32) -> Self {
        Classification { letter: Some(letter), confidence }
    }

    pub const fn none(confidence: f32) -> Self {
        Classification { letter: None, confidence }
    }

    pub fn is_letter(&self, c: char) -> bool {
        self.letter == Some(c)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.letter {
            Some(c) => write!(f, "{} ({:.2})", c, self.confidence),
            None => write!(f, "none ({:.2})", self.confidence),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rule table
// ════════════════════════════════════════════════════════════════════════════

/// One row of the table: an exact five-finger pattern mapped to a letter
/// with a fixed confidence reflecting how distinctive the hand shape is.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub letter: char,
    pub confidence: f32,
    pub pattern: FingerPattern,
}

impl Rule {
    const fn new(letter: char, confidence: f32, pattern: FingerPattern) -> Self {
        Rule { letter, confidence, pattern }
    }
}

/// Confidence reported when a hand is present but no rule matches.
pub const UNMATCHED_CONFIDENCE: f32 = 0.3;

/// The table.  Order is part of the contract; do not sort.
///
/// Pattern columns: thumb, index, middle, ring, pinky.
pub const RULES: &[Rule] = &[
    Rule::new('A', 0.9, FingerPattern::new(true, false, false, false, false)),
    Rule::new('B', 0.9, FingerPattern::new(false, true, true, true, true)),
    Rule::new('D', 0.9, FingerPattern::new(false, true, false, false, false)),
    Rule::new('E', 0.9, FingerPattern::closed()),
    // Same pattern as E; shadowed, E wins on priority.
    Rule::new('C', 0.7, FingerPattern::closed()),
    Rule::new('U', 0.9, FingerPattern::new(false, true, true, false, false)),
    // Same pattern as U; shadowed, U wins on priority.
    Rule::new('V', 0.9, FingerPattern::new(false, true, true, false, false)),
    Rule::new('W', 0.9, FingerPattern::new(false, true, true, true, false)),
    Rule::new('I', 0.9, FingerPattern::new(false, false, false, false, true)),
    Rule::new('Y', 0.9, FingerPattern::new(true, false, false, false, true)),
    // Same pattern as E; shadowed, E wins on priority.
    Rule::new('S', 0.9, FingerPattern::closed()),
];

// ════════════════════════════════════════════════════════════════════════════
// Classifier
// ════════════════════════════════════════════════════════════════════════════

/// Map a five-finger pattern to the first matching rule.
pub fn classify_pattern(pattern: FingerPattern) -> Classification {
    for rule in RULES {
        if rule.pattern == pattern {
            return Classification::letter(rule.letter, rule.confidence);
        }
    }
    Classification::none(UNMATCHED_CONFIDENCE)
}

/// Classify one frame.  No hand yields the "none" sentinel at zero
/// confidence; everything else is a pure function of the landmarks.
pub fn classify(hand: Option<&LandmarkSet>) -> Classification {
    match hand {
        Some(hand) => classify_pattern(FingerPattern::from_landmarks(hand)),
        None => Classification::none(0.0),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth;

    /// One regression fixture per reachable rule, through full landmark
    /// synthesis rather than bare patterns.
    #[test]
    fn canonical_letters_classify_with_documented_confidence() {
        let cases = [
            ('A', 0.9),
            ('B', 0.9),
            ('D', 0.9),
            ('E', 0.9),
            ('U', 0.9),
            ('W', 0.9),
            ('I', 0.9),
            ('Y', 0.9),
        ];
        for (letter, confidence) in cases {
            let hand = synth::hand_for(letter).expect("fixture");
            let got = classify(Some(&hand));
            assert_eq!(got.letter, Some(letter));
            assert_eq!(got.confidence, confidence);
        }
    }

    #[test]
    fn no_hand_is_none_at_zero() {
        assert_eq!(classify(None), Classification::none(0.0));
    }

    #[test]
    fn unmatched_pattern_is_none_at_low_confidence() {
        // Thumb+index+middle matches no rule.
        let p = FingerPattern::new(true, true, true, false, false);
        assert_eq!(classify_pattern(p), Classification::none(UNMATCHED_CONFIDENCE));
    }

    /// The documented ambiguities: identical patterns resolved purely by
    /// table order.
    #[test]
    fn closed_fist_resolves_to_e_never_c_or_s() {
        let got = classify_pattern(FingerPattern::closed());
        assert_eq!(got.letter, Some('E'));
        assert_eq!(got.confidence, 0.9);
    }

    #[test]
    fn index_middle_resolves_to_u_never_v() {
        let p = FingerPattern::new(false, true, true, false, false);
        assert_eq!(classify_pattern(p).letter, Some('U'));
    }

    #[test]
    fn shadowed_rows_are_present_but_unreachable() {
        // The dead rows must stay in the table...
        for dead in ['C', 'V', 'S'] {
            assert!(RULES.iter().any(|r| r.letter == dead));
        }
        // ...and must lose to an earlier row with the same pattern.
        for rule in RULES.iter().filter(|r| matches!(r.letter, 'C' | 'V' | 'S')) {
            assert_ne!(classify_pattern(rule.pattern).letter, Some(rule.letter));
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let hand = synth::hand_for('W').unwrap();
        let first = classify(Some(&hand));
        for _ in 0..10 {
            assert_eq!(classify(Some(&hand)), first);
        }
    }

    #[test]
    fn every_rule_confidence_is_in_unit_interval() {
        for rule in RULES {
            assert!((0.0..=1.0).contains(&rule.confidence), "{}", rule.letter);
        }
    }
}
