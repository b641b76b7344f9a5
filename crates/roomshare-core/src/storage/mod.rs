mod config;
pub mod tasks_file;

pub use config::{Config, ListConfig, LogConfig, StorageConfig};
pub use tasks_file::{write_log, TaskFile};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/roomshare[-dev]/` based on ROOMSHARE_ENV.
///
/// Set ROOMSHARE_ENV=dev to use the development data directory, or
/// ROOMSHARE_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("ROOMSHARE_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ROOMSHARE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("roomshare-dev")
            } else {
                base_dir.join("roomshare")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
