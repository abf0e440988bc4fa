//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Finger-spelling bridge for the serial spelling game.
#[derive(Parser, Debug)]
#[command(name = "sign_bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge: scripted hand frames against the serial device
    Run {
        /// Letters to perform, e.g. "BADE" (whitespace is ignored)
        script: String,

        /// Frames each letter is held
        #[arg(long, default_value = "3")]
        dwell: usize,

        /// Empty frames inserted before each letter
        #[arg(long, default_value = "2")]
        gap: usize,

        /// Serial device path or fragment (overrides config; empty =
        /// autodetect)
        #[arg(short, long)]
        port: Option<String>,

        /// Rehearse without hardware: serve these words locally and
        /// acknowledge completions via loopback (repeatable)
        #[arg(long = "sim-word")]
        sim_words: Vec<String>,
    },

    /// List candidate serial devices and the autodetect choice
    Ports,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
