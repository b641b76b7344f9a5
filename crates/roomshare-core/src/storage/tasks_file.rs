//! JSON persistence for task lists and plain-text log snapshots.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};

use crate::error::StorageError;
use crate::task::Task;

/// One task list on disk, stored as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the list. A missing file is an empty list.
    ///
    /// # Errors
    ///
    /// [`StorageError::LoadFailed`] when the file exists but cannot be read or
    /// decoded.
    pub fn load(&self) -> Result<Vec<Task>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.load_failed(e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| self.load_failed(e))
    }

    /// Read the list, treating any failure as an empty list.
    pub fn load_or_empty(&self) -> Vec<Task> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "starting with an empty task list");
            Vec::new()
        })
    }

    /// Write the list, creating parent directories as needed.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.save_failed(e))?;
        }
        let content = serde_json::to_string_pretty(tasks).map_err(|e| self.save_failed(e))?;
        std::fs::write(&self.path, content).map_err(|e| self.save_failed(e))?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "task list saved");
        Ok(())
    }

    fn load_failed(&self, e: impl std::fmt::Display) -> StorageError {
        StorageError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn save_failed(&self, e: impl std::fmt::Display) -> StorageError {
        StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

/// Write `lines` to `log_<YYYYMMDD_HHMMSS>.txt` under `dir`, stamped with
/// the local time of `now`. Returns the file's path.
pub fn write_log<I, S>(dir: &Path, lines: I, now: DateTime<Utc>) -> Result<PathBuf, StorageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stamp = now.with_timezone(&Local).format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("log_{stamp}.txt"));
    let failed = |e: std::io::Error| StorageError::LogExportFailed {
        path: path.clone(),
        message: e.to_string(),
    };

    std::fs::create_dir_all(dir).map_err(failed)?;
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    std::fs::write(&path, content).map_err(failed)?;
    tracing::info!(path = %path.display(), "log written");
    Ok(path)
}
