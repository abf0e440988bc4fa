//! sign_bridge — entry point.

use std::path::Path;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sign_bridge::cli::{Cli, Commands};
use sign_bridge::{app, BridgeConfig, ScriptedSource, SpellSession};
use sign_link::Link;
use sign_model::Selector;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = if let Some(path) = &cli.config {
        BridgeConfig::load(path)?
    } else {
        BridgeConfig::load_default()?
    };

    match cli.command {
        Commands::Run { script, dwell, gap, port, sim_words } => {
            run_bridge(&config, &script, dwell, gap, port, sim_words)?;
        }
        Commands::Ports => {
            list_ports(&config);
        }
    }

    Ok(())
}

fn run_bridge(
    config: &BridgeConfig,
    script: &str,
    dwell: usize,
    gap: usize,
    port_override: Option<String>,
    sim_words: Vec<String>,
) -> anyhow::Result<()> {
    let selector = if config.model.enabled {
        Selector::with_model(Path::new(&config.model.path))
    } else {
        Selector::geometry_only()
    };
    info!(
        learned = selector.has_learned(),
        "classification strategy ready"
    );

    let mut link = if sim_words.is_empty() {
        let preferred = port_override.as_deref().unwrap_or(&config.serial.port);
        Link::connect_or_degraded(
            Some(preferred).filter(|p| !p.is_empty()),
            config.serial.baud,
            Duration::from_millis(config.serial.read_timeout_ms),
        )
    } else {
        info!(words = sim_words.len(), "rehearsal mode; loopback device");
        Link::simulated(sim_words)
    };

    let mut source = ScriptedSource::from_letters(script, dwell, gap);
    let mut session = SpellSession::new(config.session.accept_confidence);
    let ack_timeout = Duration::from_secs(config.session.ack_timeout_secs);

    let summary = app::run(&mut source, &selector, &mut link, &mut session, ack_timeout);

    println!();
    println!(
        "  {} frames · {} word(s) completed · {} abandoned",
        summary.frames, summary.words_completed, summary.words_abandoned
    );
    Ok(())
}

fn list_ports(config: &BridgeConfig) {
    let ports = serialport::available_ports().unwrap_or_default();
    if ports.is_empty() {
        println!("  No serial ports enumerated.");
    } else {
        println!("  Enumerated ports:");
        for p in &ports {
            println!("    {}", p.port_name);
        }
    }
    let preferred = Some(config.serial.port.as_str()).filter(|p| !p.is_empty());
    match sign_link::discover(preferred) {
        Some(choice) => println!("  Autodetect would open: {}", choice),
        None => println!("  Autodetect found nothing."),
    }
}
