//! # sign_bridge
//!
//! The spelling bridge application: per-frame hand landmarks come in from
//! a detector seam, letters come out of the classification strategy, and
//! a turn-based spelling session keeps a serial-linked microcontroller in
//! sync.
//!
//! ## Flow
//!
//! ```text
//!                 ┌────────────┐   letter,conf   ┌──────────────┐
//!  HandSource ───▶│  Selector  │────────────────▶│ SpellSession │──┐
//!                 └────────────┘                 └──────────────┘  │ TriggerCompletion
//!                                                      ▲           ▼
//!                 ┌────────────┐   LinkEvent           │     ┌───────────┐
//!  serial device ─▶│ listener  │───────────────────────┘     │  writer   │─▶ serial device
//!                 └────────────┘   (ordered mpsc)            └───────────┘
//! ```
//!
//! The session machine is single-owner: only the frame loop touches it.
//! Each iteration drains every pending hardware event before the current
//! frame's classification is applied, so acknowledgements land at a
//! deterministic point.  The one blocking spot is the bounded wait for
//! the completion acknowledge.

pub mod app;
pub mod cli;
pub mod config;
pub mod detect;
pub mod session;

pub use app::{run, RunSummary};
pub use config::BridgeConfig;
pub use detect::{HandSource, ScriptedSource};
pub use session::{Phase, SpellSession};

// ════════════════════════════════════════════════════════════════════════════
// Error
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Link(#[from] sign_link::LinkError),
}
