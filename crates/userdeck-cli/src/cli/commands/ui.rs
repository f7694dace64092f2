//! Interactive UI command.

use anyhow::{Context, Result};
use userdeck_core::config::Config;
use userdeck_core::memory::MemoryBackend;
use userdeck_core::{Route, firebase};

pub async fn run(config: &Config, screen: Option<Route>, memory: bool) -> Result<()> {
    let start = screen.unwrap_or(config.start_screen);
    let collaborators = if memory {
        tracing::info!("Using in-memory auth and storage");
        MemoryBackend::default().collaborators()
    } else {
        firebase::collaborators(config).context("configure Firebase")?
    };
    userdeck_tui::run_interactive(config, collaborators, start).await
}
