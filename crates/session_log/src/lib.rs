mod error;
mod paths;
mod retention;
mod store;

pub use error::SessionLogError;
pub use paths::{
    is_session_file_name, log_root, sanitize_timestamp_for_filename, session_file_name, LOG_DIR,
};
pub use retention::{prune_sessions, MAX_SESSIONS};
pub use store::SessionLog;
