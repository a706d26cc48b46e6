use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use console_menu::{LogError, LogSink};
use time::OffsetDateTime;

use crate::error::SessionLogError;
use crate::paths::{log_root, session_file_name};
use crate::retention::prune_sessions;

/// One session's audit log file.
///
/// Nothing touches the disk until the first line arrives. The directory is then created, old
/// sessions are pruned and the file is created; if any of that fails the next line tries again.
/// Each line is written with its own open, append and close.
#[derive(Debug, Clone)]
pub struct SessionLog {
    dir: PathBuf,
    path: PathBuf,
    prepared: bool,
}

impl SessionLog {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, started_at: OffsetDateTime) -> Self {
        let dir = dir.into();
        let path = dir.join(session_file_name(started_at));
        Self {
            dir,
            path,
            prepared: false,
        }
    }

    /// Session starting now in `dir`.
    #[must_use]
    pub fn starting_now(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, local_now())
    }

    /// Session starting now under `<cwd>/LOG`.
    #[must_use]
    pub fn in_cwd(cwd: &Path) -> Self {
        Self::starting_now(log_root(cwd))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn append_line(&mut self, line: &str) -> Result<(), SessionLogError> {
        if !self.prepared {
            self.prepare()?;
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| SessionLogError::io("opening session log", &self.path, source))?;
        writeln!(file, "{line}")
            .map_err(|source| SessionLogError::io("appending to session log", &self.path, source))
    }

    fn prepare(&mut self) -> Result<(), SessionLogError> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(SessionLogError::NotADirectory {
                path: self.dir.clone(),
            });
        }
        fs::create_dir_all(&self.dir)
            .map_err(|source| SessionLogError::io("creating log directory", &self.dir, source))?;

        if !self.path.exists() {
            prune_sessions(&self.dir)?;
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|source| SessionLogError::io("creating session log", &self.path, source))?;
            tracing::info!(path = %self.path.display(), "session log created");
        }

        self.prepared = true;
        Ok(())
    }
}

impl LogSink for SessionLog {
    fn append(&mut self, line: &str) -> Result<(), LogError> {
        self.append_line(line).map_err(LogError::from)
    }
}

fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
