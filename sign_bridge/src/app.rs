//! The frame loop.
//!
//! One iteration: drain every pending hardware event, pull one frame,
//! classify it, feed the session.  When the session fires its completion
//! command the loop writes the salvo and parks in a bounded wait for the
//! acknowledge — the single deliberate backpressure point in the system.
//! Serial trouble degrades to warnings; only detector exhaustion ends
//! the run.

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use sign_link::{Link, LinkEvent};
use sign_model::Selector;

use crate::detect::HandSource;
use crate::session::SpellSession;

// ════════════════════════════════════════════════════════════════════════════
// RunSummary
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub words_completed: usize,
    pub words_abandoned: usize,
}

// ════════════════════════════════════════════════════════════════════════════
// run — the loop
// ════════════════════════════════════════════════════════════════════════════

/// Drive the session until the hand source is exhausted.
pub fn run(
    source: &mut dyn HandSource,
    selector: &Selector,
    link: &mut Link,
    session: &mut SpellSession,
    ack_timeout: Duration,
) -> RunSummary {
    let mut summary = RunSummary::default();

    loop {
        // 1. Hardware events observed so far, in arrival order.
        drain_events(&link.events, session);

        // 2. One frame from the detector.
        let Some(hand) = source.next_frame() else {
            info!("hand source exhausted; stopping");
            break;
        };
        summary.frames += 1;

        // 3. Classify and feed the session.
        let result = selector.classify(hand.as_ref());
        if let Some(command) = session.observe(&result) {
            if let Err(e) = link.writer.send(command) {
                warn!("completion command undeliverable ({e}); continuing");
            }
            // 4. The handshake: wait, bounded, for the acknowledge.
            if wait_for_ack(&link.events, session, ack_timeout) {
                summary.words_completed += 1;
            } else {
                summary.words_abandoned += 1;
            }
        }
    }

    summary
}

fn drain_events(events: &Receiver<LinkEvent>, session: &mut SpellSession) {
    loop {
        match events.try_recv() {
            Ok(event) => session.handle_event(event),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                // Listener is gone; the session keeps running on frames
                // alone.
                debug!("event channel closed");
                break;
            }
        }
    }
}

/// Returns `true` when the acknowledge arrived, `false` when the word
/// had to be abandoned.
fn wait_for_ack(
    events: &Receiver<LinkEvent>,
    session: &mut SpellSession,
    timeout: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;

    while session.awaiting_ack() {
        let now = Instant::now();
        if now >= deadline {
            session.abandon_word();
            return false;
        }
        match events.recv_timeout(deadline - now) {
            // Acknowledge flips the session to idle; a word announced in
            // the meantime is queued by the session itself.
            Ok(event) => session.handle_event(event),
            Err(RecvTimeoutError::Timeout) => {
                session.abandon_word();
                return false;
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("event channel closed while awaiting acknowledge");
                session.abandon_word();
                return false;
            }
        }
    }
    true
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ScriptedSource;
    use crate::session::Phase;
    use sign_link::CommandWriter;
    use std::sync::mpsc;

    fn quick_timeout() -> Duration {
        Duration::from_millis(20)
    }

    #[test]
    fn scripted_word_completes_against_the_simulated_device() {
        let mut link = Link::simulated(["BAD"]);
        let mut source = ScriptedSource::from_letters("BAD", 3, 2);
        let mut session = SpellSession::default();
        let selector = Selector::geometry_only();

        let summary = run(
            &mut source,
            &selector,
            &mut link,
            &mut session,
            quick_timeout(),
        );

        assert_eq!(summary.words_completed, 1);
        assert_eq!(summary.words_abandoned, 0);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn two_words_complete_in_sequence() {
        let mut link = Link::simulated(["BAD", "WED"]);
        // Extra noise between words exercises the idle → spelling
        // hand-over from the queue.
        let mut source = ScriptedSource::from_letters("BAD X WED", 2, 1);
        let mut session = SpellSession::default();
        let selector = Selector::geometry_only();

        let summary = run(
            &mut source,
            &selector,
            &mut link,
            &mut session,
            quick_timeout(),
        );

        assert_eq!(summary.words_completed, 2);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn missing_acknowledge_abandons_the_word() {
        // A word arrives but nothing ever acknowledges: null writer, no
        // loopback.
        let (tx, events) = mpsc::channel();
        tx.send(LinkEvent::NewWord("AB".into())).unwrap();
        let mut link = Link { events, writer: CommandWriter::null(), port_name: None };

        let mut source = ScriptedSource::from_letters("AB", 2, 0);
        let mut session = SpellSession::default();
        let selector = Selector::geometry_only();

        let summary = run(
            &mut source,
            &selector,
            &mut link,
            &mut session,
            quick_timeout(),
        );

        assert_eq!(summary.words_completed, 0);
        assert_eq!(summary.words_abandoned, 1);
        assert_eq!(session.phase(), Phase::Idle);
        // `tx` stays alive to this point so the wait times out rather
        // than observing a closed channel.
        drop(tx);
    }

    #[test]
    fn unmatched_frames_leave_the_session_spelling() {
        let mut link = Link::simulated(["DAB"]);
        let mut source = ScriptedSource::from_letters("BBBB", 1, 0);
        let mut session = SpellSession::default();
        let selector = Selector::geometry_only();

        let summary = run(
            &mut source,
            &selector,
            &mut link,
            &mut session,
            quick_timeout(),
        );

        assert_eq!(summary.frames, 4);
        assert_eq!(summary.words_completed, 0);
        assert_eq!(session.phase(), Phase::Spelling);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn run_with_no_frames_does_nothing() {
        let mut link = Link::simulated(["BAD"]);
        let mut source = ScriptedSource::from_frames(vec![]);
        let mut session = SpellSession::default();
        let selector = Selector::geometry_only();

        let summary = run(
            &mut source,
            &selector,
            &mut link,
            &mut session,
            quick_timeout(),
        );
        assert_eq!(summary, RunSummary { frames: 0, words_completed: 0, words_abandoned: 0 });
    }

    #[test]
    fn closed_event_channel_does_not_stop_the_frame_loop() {
        let (tx, events) = mpsc::channel();
        tx.send(LinkEvent::NewWord("A".into())).unwrap();
        drop(tx);
        let mut link = Link { events, writer: CommandWriter::null(), port_name: None };

        let mut source = ScriptedSource::from_letters("A", 2, 0);
        let mut session = SpellSession::default();
        let selector = Selector::geometry_only();

        let summary = run(
            &mut source,
            &selector,
            &mut link,
            &mut session,
            quick_timeout(),
        );

        // The word still completes at the state-machine layer; only the
        // acknowledge can never arrive.
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.words_abandoned, 1);
    }
}
