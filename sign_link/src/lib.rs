//! # sign_link
//!
//! Serial bridge to the spelling-game microcontroller.
//!
//! The wire format is a stream of ASCII lines terminated by `\n`.  The
//! device announces target words (`WORD:<payload>`) and acknowledges
//! completed ones (`DONE`); the host fires the completion salvo
//! (`SERVO`, `LED_BLINK`) when a word has been spelled.  Anything else on
//! the wire is noise and is dropped without comment.
//!
//! Ownership is split once and never shared: a background listener thread
//! owns the read half exclusively and publishes [`LinkEvent`]s over an
//! ordered `mpsc` channel; the caller keeps the write half.  A read error
//! ends the listener cleanly — reconnection is the owning process's
//! business, not this crate's.

pub mod codec;
pub mod event;
pub mod listener;
pub mod port;
pub mod writer;

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use tracing::{info, warn};

pub use codec::LineCodec;
pub use event::{LinkCommand, LinkEvent};
pub use listener::spawn_listener;
pub use port::{discover, open};
pub use writer::{CommandWriter, LinkOut, LoopbackLink, NullLink, PortLink};

/// Default bit rate of the microcontroller link.  A configuration
/// default, not a protocol constant.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Default per-read timeout for the listener's polling reads.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(50);

// ════════════════════════════════════════════════════════════════════════════
// LinkError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("no serial device found")]
    NoDevice,
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),
    #[error("serial i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// Link — connected event source + command sink
// ════════════════════════════════════════════════════════════════════════════

/// A connected (or degraded) bridge: the listener's event channel plus
/// the exclusive command writer.
pub struct Link {
    pub events: Receiver<LinkEvent>,
    pub writer: CommandWriter,
    /// Device path actually opened; `None` in degraded mode.
    pub port_name: Option<String>,
}

impl Link {
    /// Discover and open the device, split it into a reader (handed to
    /// the listener thread) and a writer.
    pub fn connect(
        preferred: Option<&str>,
        baud: u32,
        read_timeout: Duration,
    ) -> Result<Self, LinkError> {
        let name = port::discover(preferred).ok_or(LinkError::NoDevice)?;
        let write_half = port::open(&name, baud, read_timeout)?;
        let read_half = write_half.try_clone()?;
        info!(port = %name, baud, "serial link up");
        Ok(Link {
            events: listener::spawn_listener(read_half),
            writer: CommandWriter::new(Box::new(PortLink::new(write_half))),
            port_name: Some(name),
        })
    }

    /// Like [`Link::connect`], but degrade instead of failing: without a
    /// device the event channel stays silent and commands go to a null
    /// sink.  The session layer keeps running either way.
    pub fn connect_or_degraded(
        preferred: Option<&str>,
        baud: u32,
        read_timeout: Duration,
    ) -> Self {
        match Self::connect(preferred, baud, read_timeout) {
            Ok(link) => link,
            Err(e) => {
                warn!("serial link unavailable ({e}); commands will be dropped");
                let (_tx, events) = mpsc::channel();
                Link {
                    events,
                    writer: CommandWriter::null(),
                    port_name: None,
                }
            }
        }
    }

    /// A hardware-free link for rehearsal runs: the given words are
    /// served as `NewWord` events in order, and each completion salvo is
    /// acknowledged locally by a loopback device stand-in.
    pub fn simulated<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tx, events) = mpsc::channel();
        for word in words {
            let word: String = word.into();
            let _ = tx.send(LinkEvent::NewWord(word.trim().to_ascii_uppercase()));
        }
        Link {
            events,
            writer: CommandWriter::new(Box::new(writer::LoopbackLink::new(tx))),
            port_name: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.port_name.is_none()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
