//! The spelling-session state machine.
//!
//! `Idle` → `Spelling` → `AwaitingAck` → `Idle`.  The machine owns its
//! state exclusively and is driven from one thread: hardware events and
//! classified frames are fed to it in whatever order the frame loop
//! observed them.
//!
//! The classifier is treated as a noisy oracle.  Frames that do not
//! match the expected letter are ignored without penalty; a match only
//! counts above the acceptance threshold; and the cursor advance is a
//! one-shot edge, so duplicate correct frames at an already-passed
//! position are harmless.  Words announced mid-session queue up and are
//! consumed one at a time — the boundary between words is always an
//! explicit acknowledge (or an abandonment).

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use sign_geom::Classification;
use sign_link::{LinkCommand, LinkEvent};

/// Confidence a match must strictly exceed to advance the cursor.
pub const DEFAULT_ACCEPT_CONFIDENCE: f32 = 0.4;

// ════════════════════════════════════════════════════════════════════════════
// Phase
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No target word.
    Idle,
    /// Cursor is marching through the target word.
    Spelling,
    /// Completion salvo sent; waiting for the device's acknowledge.
    AwaitingAck,
}

// ════════════════════════════════════════════════════════════════════════════
// SpellSession
// ════════════════════════════════════════════════════════════════════════════

pub struct SpellSession {
    phase: Phase,
    /// Letters of the active word; empty while `Idle`.
    letters: Vec<char>,
    /// Next position to match; always in `[0, letters.len()]`.
    cursor: usize,
    /// Words announced while a session was active, in arrival order.
    pending: VecDeque<String>,
    accept_confidence: f32,
}

impl SpellSession {
    pub fn new(accept_confidence: f32) -> Self {
        SpellSession {
            phase: Phase::Idle,
            letters: Vec::new(),
            cursor: 0,
            pending: VecDeque::new(),
            accept_confidence,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The active word, or `None` while idle.
    pub fn word(&self) -> Option<String> {
        if self.phase == Phase::Idle {
            None
        } else {
            Some(self.letters.iter().collect())
        }
    }

    /// The letter the session is waiting for, if any.
    pub fn expected(&self) -> Option<char> {
        if self.phase == Phase::Spelling {
            self.letters.get(self.cursor).copied()
        } else {
            None
        }
    }

    pub fn awaiting_ack(&self) -> bool {
        self.phase == Phase::AwaitingAck
    }

    pub fn pending_words(&self) -> usize {
        self.pending.len()
    }

    // ── hardware events ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::NewWord(word) => {
                if self.phase == Phase::Idle {
                    self.begin(word);
                } else {
                    debug!(word = %word, "word queued until session is idle");
                    self.pending.push_back(word);
                }
            }
            LinkEvent::Acknowledge => {
                if self.phase == Phase::AwaitingAck {
                    info!(word = %self.word_text(), "completion acknowledged");
                    self.reset_to_idle();
                } else {
                    debug!("stray acknowledge ignored");
                }
            }
        }
    }

    // ── classified frames ────────────────────────────────────────────────

    /// Apply one frame's classification.  Returns the completion command
    /// exactly once, on the frame that matches the final letter.
    pub fn observe(&mut self, result: &Classification) -> Option<LinkCommand> {
        if self.phase != Phase::Spelling {
            return None;
        }
        let expected = self.letters[self.cursor];
        let matched = result
            .letter
            .map(|l| l == expected && result.confidence > self.accept_confidence)
            .unwrap_or(false);
        if !matched {
            return None;
        }

        self.cursor += 1;
        info!(letter = %expected, cursor = self.cursor, word = %self.word_text(), "letter matched");

        if self.cursor == self.letters.len() {
            self.phase = Phase::AwaitingAck;
            info!(word = %self.word_text(), "word complete; awaiting acknowledge");
            Some(LinkCommand::TriggerCompletion)
        } else {
            None
        }
    }

    // ── recovery ─────────────────────────────────────────────────────────

    /// Force the session back to `Idle`, dropping the active word.  Used
    /// when the acknowledge never arrives within its bound.
    pub fn abandon_word(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        warn!(word = %self.word_text(), "word abandoned");
        self.reset_to_idle();
    }

    // ── internals ────────────────────────────────────────────────────────

    fn begin(&mut self, word: String) {
        let letters: Vec<char> = word.chars().collect();
        if letters.is_empty() {
            // The codec already filters empty payloads; a zero-length
            // word would complete without a single matching frame.
            warn!("ignoring empty target word");
            return;
        }
        info!(word = %word, "spelling session started");
        self.letters = letters;
        self.cursor = 0;
        self.phase = Phase::Spelling;
    }

    fn reset_to_idle(&mut self) {
        self.letters.clear();
        self.cursor = 0;
        self.phase = Phase::Idle;
        if let Some(next) = self.pending.pop_front() {
            self.begin(next);
        }
    }

    fn word_text(&self) -> String {
        self.letters.iter().collect()
    }
}

impl Default for SpellSession {
    fn default() -> Self {
        SpellSession::new(DEFAULT_ACCEPT_CONFIDENCE)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
