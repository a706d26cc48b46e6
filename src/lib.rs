//! Keypress-driven terminal menus.
//!
//! A [`Menu`] renders a header and a list of [`Operation`] titles, reads one [`Key`] from a
//! [`Terminal`], runs the operation bound to it and folds the returned [`Report`] back into its
//! own state. An optional [`LogSink`] observes every iteration without affecting control flow.
//!
//! # Public API Overview
//! - Build operations from closures with [`FnOperation`] or implement [`Operation`] directly.
//! - Drive a menu on a real terminal with [`ProcessTerminal`] and [`TerminalGuard`], or headless
//!   with [`ScriptedTerminal`].
//! - Share one audit destination between nested menus with [`SharedLogSink`].

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;

pub use crate::config::EnvConfig;
pub use crate::error::MenuError;

/// Keys and their textual ids.
pub use crate::core::key::{Key, KeyParseError};

/// Operation contract.
pub use crate::core::operation::{Binding, FnOperation, Operation};

/// Operation outcomes.
pub use crate::core::report::{Control, Report, UNDEFINED_ORIGIN};

/// Terminal interfaces and implementations.
pub use crate::core::terminal::{Terminal, TerminalGuard};
pub use crate::platform::{ProcessTerminal, ScriptedTerminal, TerminalTrace};

/// Audit log sinks.
pub use crate::logging::{LogError, LogSink, MemoryLogSink, SharedLogSink};

/// Menu loop.
pub use crate::runtime::audit::{CONTINUE_PROMPT, LOGGING_ERROR_BANNER};
pub use crate::runtime::dispatch::{DUPLICATE_KEY_MESSAGE, NOT_FOUND_MESSAGE};
pub use crate::runtime::menu::{Menu, MenuState, PROMPT};
