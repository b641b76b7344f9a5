//! Scheduling engines over the task list.
//!
//! - [`conflict`]: duplicate and time-clash classification
//! - [`lifecycle`]: active → overdue migration and leave expiry
//! - [`ordering`]: sort policies with done-last ordering
//! - [`adjust`]: snooze, completion and reopen
//! - [`recurrence`]: roll-forward of recurring tasks

pub mod adjust;
pub mod conflict;
pub mod lifecycle;
pub mod ordering;
pub mod recurrence;

#[cfg(test)]
mod ordering_tests;

pub use conflict::{classify, classify_excluding, meetings_clash, Verdict};
pub use lifecycle::{migrate, MigrationReport, Standing};
pub use ordering::{sort, SortPolicy};
