//! Newline-framed protocol codec.
//!
//! Inbound bytes arrive in arbitrary chunks; a line may be split across
//! any number of reads.  The codec accumulates until a `\n` is seen and
//! keeps a trailing partial line buffered for the next chunk.
//!
//! Recognized inbound lines (after trimming surrounding whitespace,
//! which also swallows `\r` on CRLF devices):
//!
//! * `WORD:<payload>` — payload trimmed and upper-cased; an empty
//!   payload is noise.
//! * `DONE` — exact match.
//!
//! Every other line is silently discarded; noise on the wire is normal.

use crate::event::{LinkCommand, LinkEvent};

// ════════════════════════════════════════════════════════════════════════════
// Inbound
// ════════════════════════════════════════════════════════════════════════════

const WORD_PREFIX: &str = "WORD:";
const ACK_TOKEN: &str = "DONE";

/// Parse one complete line (without its terminator).  `None` means the
/// line is noise, not an error.
pub fn parse_line(line: &str) -> Option<LinkEvent> {
    let line = line.trim();
    if let Some(payload) = line.strip_prefix(WORD_PREFIX) {
        let word = payload.trim().to_ascii_uppercase();
        if word.is_empty() {
            return None;
        }
        return Some(LinkEvent::NewWord(word));
    }
    if line == ACK_TOKEN {
        return Some(LinkEvent::Acknowledge);
    }
    None
}

/// Byte-accumulating line decoder.
#[derive(Debug, Default)]
pub struct LineCodec {
    buf: Vec<u8>,
}

impl LineCodec {
    pub fn new() -> Self {
        LineCodec::default()
    }

    /// Feed a chunk; return every event completed by it, in wire order.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<LinkEvent> {
        self.buf.extend_from_slice(bytes);
        let mut events = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            if let Some(event) = parse_line(&text) {
                events.push(event);
            }
        }
        events
    }

    /// Bytes buffered while waiting for a terminator.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outbound
// ════════════════════════════════════════════════════════════════════════════

/// Wire form of a command: newline-terminated ASCII tokens, written
/// back-to-back with a flush after each.  Completion is a two-line salvo.
pub fn encode(command: LinkCommand) -> &'static [&'static [u8]] {
    match command {
        LinkCommand::TriggerCompletion => &[b"SERVO\n", b"LED_BLINK\n"],
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_line_is_trimmed_and_uppercased() {
        assert_eq!(
            parse_line("WORD:  cat \r"),
            Some(LinkEvent::NewWord("CAT".into()))
        );
    }

    #[test]
    fn done_line_acknowledges() {
        assert_eq!(parse_line(" DONE \r"), Some(LinkEvent::Acknowledge));
    }

    #[test]
    fn noise_lines_are_dropped() {
        for noise in ["", "boot: ok", "DONE!", "word:cat", "WORDS:CAT", "WORD:"] {
            assert_eq!(parse_line(noise), None, "{noise:?}");
        }
    }

    #[test]
    fn line_split_across_two_chunks_yields_one_event() {
        let mut codec = LineCodec::new();
        assert!(codec.push(b"WOR").is_empty());
        assert_eq!(codec.pending(), 3);
        let events = codec.push(b"D:CAT\n");
        assert_eq!(events, vec![LinkEvent::NewWord("CAT".into())]);
        assert_eq!(codec.pending(), 0);
    }

    #[test]
    fn one_chunk_may_complete_many_lines() {
        let mut codec = LineCodec::new();
        let events = codec.push(b"WORD:DOG\njunk\nDONE\nWOR");
        assert_eq!(
            events,
            vec![LinkEvent::NewWord("DOG".into()), LinkEvent::Acknowledge]
        );
        // Trailing partial stays buffered.
        assert_eq!(codec.pending(), 3);
        assert_eq!(codec.push(b"D:OWL\n"), vec![LinkEvent::NewWord("OWL".into())]);
    }

    #[test]
    fn byte_at_a_time_delivery_still_decodes() {
        let mut codec = LineCodec::new();
        let mut events = Vec::new();
        for b in b"WORD:HI\nDONE\n" {
            events.extend(codec.push(&[*b]));
        }
        assert_eq!(
            events,
            vec![LinkEvent::NewWord("HI".into()), LinkEvent::Acknowledge]
        );
    }

    #[test]
    fn crlf_framing_is_tolerated() {
        let mut codec = LineCodec::new();
        let events = codec.push(b"WORD:FOX\r\nDONE\r\n");
        assert_eq!(
            events,
            vec![LinkEvent::NewWord("FOX".into()), LinkEvent::Acknowledge]
        );
    }

    #[test]
    fn completion_encodes_as_two_line_salvo() {
        let lines = encode(LinkCommand::TriggerCompletion);
        assert_eq!(lines, &[b"SERVO\n" as &[u8], b"LED_BLINK\n"]);
        for line in lines {
            assert_eq!(line.last(), Some(&b'\n'));
        }
    }
}
