//! Terminal integrations: the process terminal and a scripted headless one.

pub mod process_terminal;
pub mod scripted_terminal;
pub mod stdin_buffer;

pub use process_terminal::ProcessTerminal;
pub use scripted_terminal::{ScriptedTerminal, TerminalTrace};
