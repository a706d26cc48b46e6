use std::path::{Path, PathBuf};

use console_menu::runtime::audit::format_timestamp;
use time::OffsetDateTime;

pub const LOG_DIR: &str = "LOG";

const SESSION_PREFIX: &str = "LogSession_";
const SESSION_SUFFIX: &str = ".txt";

#[must_use]
pub fn log_root(cwd: &Path) -> PathBuf {
    cwd.join(LOG_DIR)
}

#[must_use]
pub fn sanitize_timestamp_for_filename(timestamp: &str) -> String {
    timestamp
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '-',
            _ => c,
        })
        .collect()
}

/// `LogSession_<YYYY-MM-DD HH-MM-SS>.txt`
#[must_use]
pub fn session_file_name(started_at: OffsetDateTime) -> String {
    format!(
        "{SESSION_PREFIX}{}{SESSION_SUFFIX}",
        sanitize_timestamp_for_filename(&format_timestamp(started_at))
    )
}

#[must_use]
pub fn is_session_file_name(name: &str) -> bool {
    name.len() > SESSION_PREFIX.len() + SESSION_SUFFIX.len()
        && name.starts_with(SESSION_PREFIX)
        && name.ends_with(SESSION_SUFFIX)
}
