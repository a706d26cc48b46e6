//! Environment configuration.

use std::env;
use std::path::PathBuf;

pub const LOG_ENV: &str = "CONSOLE_MENU_LOG";
pub const SHOW_LOG_ERRORS_ENV: &str = "CONSOLE_MENU_SHOW_LOG_ERRORS";
pub const LOG_DIR_ENV: &str = "CONSOLE_MENU_LOG_DIR";
pub const TRACE_LOG_ENV: &str = "CONSOLE_MENU_TRACE_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Write the audit log.
    pub logging: bool,
    /// Show audit log failures to the user instead of swallowing them.
    pub show_logging_errors: bool,
    /// Audit log directory; the session log picks its default when unset.
    pub log_dir: Option<PathBuf>,
    /// Diagnostics file for `tracing` output.
    pub trace_log: Option<PathBuf>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            logging: env_flag(LOG_ENV),
            show_logging_errors: env_flag(SHOW_LOG_ERRORS_ENV),
            log_dir: env_string_opt(LOG_DIR_ENV).map(PathBuf::from),
            trace_log: env_string_opt(TRACE_LOG_ENV).map(PathBuf::from),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
