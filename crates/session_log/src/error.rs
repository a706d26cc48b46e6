use std::path::PathBuf;

use console_menu::LogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionLogError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log directory path {path} exists but is not a directory")]
    NotADirectory { path: PathBuf },
}

impl SessionLogError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

impl From<SessionLogError> for LogError {
    fn from(error: SessionLogError) -> Self {
        match error {
            SessionLogError::Io {
                operation,
                path,
                source,
            } => LogError::io(operation, path, source),
            other => LogError::Rejected(other.to_string()),
        }
    }
}
