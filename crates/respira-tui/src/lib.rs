//! Full-screen TUI for respira.

pub mod audio;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use respira_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the guided-breathing screen until the user quits.
pub fn run(config: Config) -> Result<()> {
    // The breathing screen requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!("respira requires an interactive terminal.");
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()?;

    Ok(())
}
