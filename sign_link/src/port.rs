//! Serial device discovery and opening.
//!
//! Discovery prefers, in order: a configured device path, then any USB
//! bridge whose descriptors look like the usual microcontroller UART
//! chips, then whatever port enumerates first.

use std::time::Duration;

use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use tracing::debug;

use crate::LinkError;

/// Descriptor fragments of the common USB-UART bridge chips.
const USB_BRIDGE_MARKERS: [&str; 4] = ["CP210", "CH340", "USB Serial", "Silicon"];

fn looks_like_bridge(info: &SerialPortInfo) -> bool {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => {
            let product = usb.product.as_deref().unwrap_or("");
            let manufacturer = usb.manufacturer.as_deref().unwrap_or("");
            USB_BRIDGE_MARKERS
                .iter()
                .any(|m| product.contains(m) || manufacturer.contains(m))
        }
        _ => false,
    }
}

/// Pick a device path.  `preferred` (when non-empty) matches by
/// substring against enumerated port names and wins outright.
pub fn discover(preferred: Option<&str>) -> Option<String> {
    let ports = serialport::available_ports().unwrap_or_default();
    debug!(count = ports.len(), "enumerated serial ports");

    if let Some(want) = preferred.filter(|p| !p.is_empty()) {
        if let Some(p) = ports.iter().find(|p| p.port_name.contains(want)) {
            return Some(p.port_name.clone());
        }
        // A configured path may be a device node that does not enumerate.
        return Some(want.to_string());
    }

    if let Some(p) = ports.iter().find(|p| looks_like_bridge(p)) {
        return Some(p.port_name.clone());
    }
    ports.first().map(|p| p.port_name.clone())
}

/// Open a device at the given bit rate with a short polling read timeout.
pub fn open(
    path: &str,
    baud: u32,
    read_timeout: Duration,
) -> Result<Box<dyn SerialPort>, LinkError> {
    Ok(serialport::new(path, baud)
        .timeout(read_timeout)
        .open()?)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
