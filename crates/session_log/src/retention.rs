use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::SessionLogError;
use crate::paths::is_session_file_name;

/// Sessions kept in the log directory, counting the one about to be created.
pub const MAX_SESSIONS: usize = 3;

struct SessionFile {
    path: PathBuf,
    name: String,
    stamp: Option<SystemTime>,
}

/// Deletes the oldest session files in `dir` until fewer than [`MAX_SESSIONS`] remain.
///
/// Age is the creation time where the platform reports one, else the modification time; ties and
/// unknown times order by file name. Sub-directories and foreign files are left alone. Returns the
/// deleted paths, oldest first.
pub fn prune_sessions(dir: &Path) -> Result<Vec<PathBuf>, SessionLogError> {
    let mut sessions = list_sessions(dir)?;
    sessions.sort_by(|a, b| a.stamp.cmp(&b.stamp).then_with(|| a.name.cmp(&b.name)));

    let excess = (sessions.len() + 1).saturating_sub(MAX_SESSIONS);
    let mut removed = Vec::with_capacity(excess);
    for session in sessions.into_iter().take(excess) {
        fs::remove_file(&session.path)
            .map_err(|source| SessionLogError::io("removing old session log", &session.path, source))?;
        tracing::debug!(path = %session.path.display(), "pruned session log");
        removed.push(session.path);
    }
    Ok(removed)
}

fn list_sessions(dir: &Path) -> Result<Vec<SessionFile>, SessionLogError> {
    let entries = fs::read_dir(dir)
        .map_err(|source| SessionLogError::io("listing log directory", dir, source))?;

    let mut sessions = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|source| SessionLogError::io("listing log directory", dir, source))?;
        let path = entry.path();
        let metadata = entry
            .metadata()
            .map_err(|source| SessionLogError::io("reading log file metadata", &path, source))?;
        if !metadata.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !is_session_file_name(&name) {
            continue;
        }
        let stamp = metadata.created().or_else(|_| metadata.modified()).ok();
        sessions.push(SessionFile { path, name, stamp });
    }
    Ok(sessions)
}
