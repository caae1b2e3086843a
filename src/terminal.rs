//! Owned terminal handle for a viewing session.

use anyhow::{Context, Result};
use ratatui::DefaultTerminal;

/// The terminal, acquired for the lifetime of one viewing session.
///
/// Acquiring switches to the alternate screen in raw mode. Dropping the
/// session clears the screen and restores the terminal, on every exit path.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Fails when stdout is not an interactive terminal.
    pub fn acquire() -> Result<Self> {
        let terminal = ratatui::try_init()
            .context("Failed to initialize terminal - preview requires an interactive terminal")?;
        tracing::debug!("terminal session acquired");
        Ok(Self { terminal })
    }

    pub const fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.clear();
        ratatui::restore();
        tracing::debug!("terminal session released");
    }
}
