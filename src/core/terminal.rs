//! Terminal trait and lifecycle helpers.

use std::io;

use crate::core::key::Key;

/// Erase display and move the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Minimal terminal interface for a menu.
///
/// Reading a key is the only suspension point a menu has; implementations block until one
/// recognised key is available.
pub trait Terminal {
    /// Prepare the terminal for single-key input.
    fn start(&mut self) -> io::Result<()>;

    /// Restore the state saved by [`Terminal::start`].
    fn stop(&mut self) -> io::Result<()>;

    /// Block until one key is available.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Write output to the terminal.
    fn write(&mut self, data: &str);

    /// Clear the screen and home the cursor.
    fn clear(&mut self);

    fn write_line(&mut self, line: &str) {
        self.write(line);
        self.write("\n");
    }
}

/// RAII guard that stops the terminal on drop.
pub struct TerminalGuard<T: Terminal> {
    terminal: T,
    active: bool,
}

impl<T: Terminal> TerminalGuard<T> {
    /// Start `terminal` and guard it.
    pub fn start(mut terminal: T) -> io::Result<Self> {
        terminal.start()?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Access the wrapped terminal.
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    /// Stop the terminal now and report the result instead of swallowing it on drop.
    pub fn finish(mut self) -> io::Result<()> {
        self.active = false;
        self.terminal.stop()
    }
}

impl<T: Terminal> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.terminal.stop();
        }
    }
}
