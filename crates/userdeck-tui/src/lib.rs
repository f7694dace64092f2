//! Full-screen TUI for userdeck.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use features::{auth, records};
pub use runtime::{Dispatcher, TuiRuntime};
use userdeck_core::config::Config;
use userdeck_core::{Collaborators, Route};

/// Runs the interactive UI starting at `start` until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal fails.
pub async fn run_interactive(
    config: &Config,
    collaborators: Collaborators,
    start: Route,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!("The interactive UI needs a terminal; use `userdeck records` instead");
    }

    let mut runtime = TuiRuntime::new(config, collaborators)?;
    tracing::info!(path = start.path(), "Starting interactive UI");
    runtime.run(start)?;
    let signed_in_as = runtime.state().signed_in_as.clone();
    drop(runtime);

    match signed_in_as {
        Some(email) => writeln!(stderr(), "Goodbye, {email}!")?,
        None => writeln!(stderr(), "Goodbye!")?,
    }
    Ok(())
}
