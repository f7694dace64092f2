//! Terminal lifecycle.
//!
//! The terminal is restored on normal exit (the runtime's `Drop`) and on
//! panic (the hook installed by `install_panic_hook`).

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode and the alternate screen, with bracketed paste so pasted
/// text arrives as a single event.
///
/// Call `install_panic_hook()` first.
///
/// # Errors
/// Returns an error if the terminal refuses any of the mode switches.
pub fn setup_terminal() -> Result<TuiTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Leaves the alternate screen and raw mode. Safe to call more than once.
///
/// # Errors
/// Returns an error if the terminal cannot be switched back.
pub fn restore_terminal() -> Result<()> {
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Restores the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
