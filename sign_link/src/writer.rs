//! Outbound command writer.
//!
//! One trait, two backends: a real serial port and a null sink for
//! degraded runs without hardware.  The writer is owned exclusively by
//! the frame loop — there is never a second writer to the device.

use std::io::Write;

use serialport::SerialPort;
use tracing::debug;

use crate::codec;
use crate::event::LinkCommand;
use crate::LinkError;

// ════════════════════════════════════════════════════════════════════════════
// LinkOut — abstraction over serial / null
// ════════════════════════════════════════════════════════════════════════════

pub trait LinkOut: Send {
    /// Write one newline-terminated line and flush it out.
    fn send_line(&mut self, line: &[u8]) -> Result<(), LinkError>;
}

// ── serial backend ──────────────────────────────────────────────────────────

pub struct PortLink {
    port: Box<dyn SerialPort>,
}

impl PortLink {
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        PortLink { port }
    }
}

impl LinkOut for PortLink {
    fn send_line(&mut self, line: &[u8]) -> Result<(), LinkError> {
        self.port.write_all(line)?;
        self.port.flush()?;
        Ok(())
    }
}

// ── null backend (no device available) ──────────────────────────────────────

pub struct NullLink;

impl LinkOut for NullLink {
    fn send_line(&mut self, _line: &[u8]) -> Result<(), LinkError> {
        Ok(())
    }
}

// ── loopback backend (rehearsal without hardware) ───────────────────────────

/// Stands in for the device on rehearsal runs: the completion salvo is
/// answered with an immediate `DONE`, exactly as the microcontroller
/// would after moving its servo.
pub struct LoopbackLink {
    events: std::sync::mpsc::Sender<crate::event::LinkEvent>,
}

impl LoopbackLink {
    pub fn new(events: std::sync::mpsc::Sender<crate::event::LinkEvent>) -> Self {
        LoopbackLink { events }
    }
}

impl LinkOut for LoopbackLink {
    fn send_line(&mut self, line: &[u8]) -> Result<(), LinkError> {
        if line == b"SERVO\n" {
            let _ = self.events.send(crate::event::LinkEvent::Acknowledge);
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CommandWriter
// ════════════════════════════════════════════════════════════════════════════

/// Serializes [`LinkCommand`]s onto the wire, line by line.
pub struct CommandWriter {
    out: Box<dyn LinkOut>,
}

impl CommandWriter {
    pub fn new(out: Box<dyn LinkOut>) -> Self {
        CommandWriter { out }
    }

    /// Writer that drops everything; used when no device was found.
    pub fn null() -> Self {
        CommandWriter::new(Box::new(NullLink))
    }

    /// Send one command as its full line salvo, flushing after each line.
    pub fn send(&mut self, command: LinkCommand) -> Result<(), LinkError> {
        debug!(?command, "sending link command");
        for line in codec::encode(command) {
            self.out.send_line(line)?;
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Backend that records every line it is handed.
    struct RecordingLink {
        lines: Arc<Mutex<Vec<Vec<u8>>>>,
        fail: bool,
    }

    impl LinkOut for RecordingLink {
        fn send_line(&mut self, line: &[u8]) -> Result<(), LinkError> {
            if self.fail {
                return Err(LinkError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "gone",
                )));
            }
            self.lines.lock().unwrap().push(line.to_vec());
            Ok(())
        }
    }

    #[test]
    fn completion_writes_the_full_salvo_in_order() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let mut writer = CommandWriter::new(Box::new(RecordingLink {
            lines: lines.clone(),
            fail: false,
        }));
        writer.send(LinkCommand::TriggerCompletion).unwrap();
        let got = lines.lock().unwrap();
        assert_eq!(got.as_slice(), &[b"SERVO\n".to_vec(), b"LED_BLINK\n".to_vec()]);
    }

    #[test]
    fn write_failure_is_surfaced_not_swallowed() {
        let mut writer = CommandWriter::new(Box::new(RecordingLink {
            lines: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }));
        assert!(writer.send(LinkCommand::TriggerCompletion).is_err());
    }

    #[test]
    fn null_writer_accepts_anything() {
        let mut writer = CommandWriter::null();
        for _ in 0..3 {
            writer.send(LinkCommand::TriggerCompletion).unwrap();
        }
    }
}
