use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("operation '{name}' must have at least one trigger key")]
    NoTriggerKeys { name: String },

    #[error("menu loop has already stopped; build a new menu to run again")]
    Stopped,

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}

impl MenuError {
    #[must_use]
    pub fn no_trigger_keys(name: impl Into<String>) -> Self {
        Self::NoTriggerKeys { name: name.into() }
    }
}
