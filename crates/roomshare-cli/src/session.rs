//! One loaded copy of the user's data: config, task files and the store.

use std::path::{Path, PathBuf};

use chrono::Utc;
use roomshare_core::error::Result;
use roomshare_core::storage::Config;
use roomshare_core::{RefreshReport, TaskFile, TaskStore};

pub struct Session {
    pub dir: PathBuf,
    pub config: Config,
    pub store: TaskStore,
    active_file: TaskFile,
    overdue_file: TaskFile,
}

impl Session {
    /// Load the task lists from `dir`. Unreadable files start empty.
    pub fn open(dir: PathBuf, config: Config) -> Self {
        let active_file = TaskFile::new(Config::resolve(&dir, &config.storage.active_file));
        let overdue_file = TaskFile::new(Config::resolve(&dir, &config.storage.overdue_file));
        let store = TaskStore::with_saved_order(
            active_file.load_or_empty(),
            overdue_file.load_or_empty(),
            config.list.default_sort,
        );
        tracing::debug!(
            dir = %dir.display(),
            active = store.active().len(),
            overdue = store.overdue().len(),
            "session opened"
        );
        Self {
            dir,
            config,
            store,
            active_file,
            overdue_file,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.dir)
    }

    pub fn log_dir(&self) -> PathBuf {
        Config::resolve(&self.dir, &self.config.storage.log_dir)
    }

    /// Bring the store up to date with the current time.
    pub fn refresh(&mut self) -> RefreshReport {
        self.store.refresh(Utc::now())
    }

    pub fn save(&self) -> Result<()> {
        self.active_file.save(self.store.active())?;
        self.overdue_file.save(self.store.overdue())?;
        Ok(())
    }

    pub fn active_path(&self) -> &Path {
        self.active_file.path()
    }
}
