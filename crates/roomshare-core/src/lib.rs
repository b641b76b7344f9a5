//! # RoomShare Core Library
//!
//! This library provides the scheduling engine behind the RoomShare shared
//! household planner. It follows a CLI-first design: every operation is
//! available through the standalone `roomshare` binary, which is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Task model**: meetings, assignments (with subtasks) and leaves as one
//!   closed variant type
//! - **Schedule engines**: conflict detection, lifecycle migration, ordering,
//!   snooze/reopen adjustments and recurrence roll-forward
//! - **Store**: the [`TaskStore`] context object owning the active, overdue
//!   and deleted lists
//! - **Storage**: JSON task files and TOML configuration
//!
//! ## Key Components
//!
//! - [`TaskStore`]: every list operation the command layer performs
//! - [`schedule::classify`]: duplicate and time-clash verdicts
//! - [`schedule::migrate`]: active → overdue migration
//! - [`Config`]: application configuration management

pub mod error;
pub mod schedule;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{ConfigError, CoreError, StorageError, TaskError};
pub use schedule::{MigrationReport, SortPolicy, Verdict};
pub use storage::{Config, TaskFile};
pub use store::{IndexRange, Progress, RefreshReport, TaggedView, TaskStore};
pub use task::{
    MeetingDuration, Priority, RecurrenceSchedule, Subtask, Task, TaskDetails, TaskKind, TaskUpdate,
    TimeUnit,
};
