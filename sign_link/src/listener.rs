//! Background serial listener.
//!
//! Owns the read half of the device exclusively, feeds raw chunks to the
//! codec, and publishes decoded events over an ordered channel.  Timeout
//! reads are the normal idle case; a real read error (or end of stream)
//! ends the thread cleanly without delivering anything.  The listener
//! never reconnects — that is the owning process's call.

use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use crate::codec::LineCodec;
use crate::event::LinkEvent;

/// Spawn the listener on its own thread and return the receiving end of
/// its event channel.  Any `Read` will do; the production reader is the
/// cloned read half of the serial port.
pub fn spawn_listener<R>(reader: R) -> Receiver<LinkEvent>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || listen(reader, tx));
    rx
}

fn listen<R: Read>(mut reader: R, tx: Sender<LinkEvent>) {
    let mut codec = LineCodec::new();
    let mut chunk = [0u8; 256];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => {
                debug!("serial stream ended; listener stopping");
                return;
            }
            Ok(n) => {
                for event in codec.push(&chunk[..n]) {
                    debug!(?event, "link event");
                    if tx.send(event).is_err() {
                        // Consumer hung up; nothing left to do.
                        return;
                    }
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => continue,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("serial read failed ({e}); listener stopping");
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
