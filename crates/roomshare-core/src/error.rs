//! Core error types for roomshare-core.
//!
//! Every failure the engines can signal is a recoverable, typed kind. The
//! command layer decides whether to abort the current command; nothing in the
//! core is process-fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for roomshare-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task list operation errors
    #[error(transparent)]
    Task(#[from] TaskError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the task engines and the task store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Index outside `[0, len)`
    #[error("Index {} is out of bounds (list has {len} tasks)", .index + 1)]
    OutOfRange { index: usize, len: usize },

    /// Operation requires at least one task
    #[error("The {0} list is empty")]
    EmptyCollection(&'static str),

    /// Candidate matches an existing entry by description, assignee and date
    #[error("Duplicate task detected: same as task {}", .index + 1)]
    DuplicateTask { index: usize },

    /// Candidate meeting overlaps an existing meeting
    #[error("Time clash detected with task {}", .index + 1)]
    TimeClash { index: usize },

    /// Unknown priority level
    #[error("Invalid priority '{0}': expected high, medium or low")]
    InvalidPriority(String),

    /// Negative or overflowing snooze amount
    #[error("Invalid amount {0}: the amount of time cannot be negative")]
    InvalidAmount(i64),

    /// Unknown sort policy
    #[error("Invalid sort type '{0}': expected priority, alphabetical, deadline or type")]
    InvalidSortPolicy(String),

    /// Unknown time unit
    #[error("Invalid time unit '{0}': expected minutes, hours, days or months")]
    InvalidTimeUnit(String),

    /// Leaves cannot be completed
    #[error("Leave cannot be set to done (task {})", .index + 1)]
    LeaveCannotBeDone { index: usize },

    /// Subtask index does not exist on the assignment
    #[error("Subtask {} does not exist (assignment has {len})", .index + 1)]
    SubtaskNotFound { index: usize, len: usize },

    /// Subtask operation on a meeting or leave
    #[error("Only assignments support subtasks (task {} is not one)", .index + 1)]
    NotAnAssignment { index: usize },

    /// Subtask name already present on the assignment
    #[error("Duplicate subtask detected: '{0}'")]
    DuplicateSubtask(String),

    /// Date arithmetic left the supported calendar
    #[error("Date is outside the supported calendar range")]
    DateOutOfRange,

    /// Duration change on an assignment or leave
    #[error("Only meetings have a duration (task {} is not one)", .index + 1)]
    NotAMeeting { index: usize },

    /// Blank description
    #[error("Task description cannot be empty")]
    EmptyDescription,

    /// Leave ends before it starts
    #[error("Invalid leave range: end ({end}) is before start ({start})")]
    InvalidLeaveRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or decode a task file
    #[error("Failed to load tasks from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to encode or write a task file
    #[error("Failed to save tasks to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to write a plain-text log snapshot
    #[error("Failed to write log file {path}: {message}")]
    LogExportFailed { path: PathBuf, message: String },

    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_indices_are_one_based() {
        let err = TaskError::DuplicateTask { index: 3 };
        assert_eq!(err.to_string(), "Duplicate task detected: same as task 4");

        let err = TaskError::TimeClash { index: 0 };
        assert_eq!(err.to_string(), "Time clash detected with task 1");
    }

    #[test]
    fn task_error_converts_into_core_error() {
        let core: CoreError = TaskError::EmptyCollection("active").into();
        assert!(matches!(core, CoreError::Task(TaskError::EmptyCollection("active"))));
        assert_eq!(core.to_string(), "The active list is empty");
    }
}
