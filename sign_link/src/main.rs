//! Serial link probe — list candidate devices and tail decoded events.

use std::io::{self, Write};
use std::time::Duration;

use serialport::SerialPortType;
use sign_link::{Link, DEFAULT_BAUD, DEFAULT_READ_TIMEOUT};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                 Spelling Link Probe                  ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    list_ports();

    let answer = read_line("Open the preferred port and tail events? (y/N): ");
    if !answer.trim().eq_ignore_ascii_case("y") {
        return;
    }

    let path = read_line("  Device path (empty = autodetect): ");
    let preferred = Some(path.trim()).filter(|p| !p.is_empty());
    let link = Link::connect_or_degraded(preferred, DEFAULT_BAUD, DEFAULT_READ_TIMEOUT);
    match &link.port_name {
        Some(name) => println!("\n  Tailing {} — Ctrl-C to stop.\n", name),
        None => {
            println!("\n  No device opened; nothing to tail.\n");
            return;
        }
    }

    loop {
        match link.events.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => println!("  ← {:?}", event),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                println!("  Listener stopped.");
                return;
            }
        }
    }
}

fn list_ports() {
    let ports = serialport::available_ports().unwrap_or_default();
    if ports.is_empty() {
        println!("  No serial ports enumerated.");
        println!();
        return;
    }
    println!("  Enumerated ports:");
    for p in &ports {
        let kind = match &p.port_type {
            SerialPortType::UsbPort(usb) => format!(
                "USB {:04x}:{:04x} {}",
                usb.vid,
                usb.pid,
                usb.product.as_deref().unwrap_or("?")
            ),
            SerialPortType::BluetoothPort => "Bluetooth".to_string(),
            SerialPortType::PciPort => "PCI".to_string(),
            SerialPortType::Unknown => "unknown".to_string(),
        };
        println!("    {:<20} {}", p.port_name, kind);
    }
    println!();
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
