//! Typed messages crossing the serial boundary.

// ════════════════════════════════════════════════════════════════════════════
// LinkEvent — inbound, device → session
// ════════════════════════════════════════════════════════════════════════════

/// A decoded inbound message.  Produced by the listener, consumed exactly
/// once by the session machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// The device asked for a word to be spelled.  Payload is already
    /// trimmed and upper-cased.
    NewWord(String),
    /// The device confirmed the completion salvo.
    Acknowledge,
}

// ════════════════════════════════════════════════════════════════════════════
// LinkCommand — outbound, session → device
// ════════════════════════════════════════════════════════════════════════════

/// An outbound command.  Produced by the session machine, consumed by the
/// command writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkCommand {
    /// The current word was fully spelled; fire the servo and blink.
    TriggerCompletion,
}
