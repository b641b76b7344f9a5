//! Time-based migration of active tasks.
//!
//! Past-due meetings and assignments move to the overdue list; leaves whose
//! end has passed are dropped. Leaves never become overdue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::conflict::find_duplicate;
use crate::task::{Task, TaskDetails};

/// Where a task stands relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// Stays in the active list.
    Current,
    /// Instant has passed; belongs in the overdue list.
    Overdue,
    /// A leave that has ended; discarded.
    Expired,
}

/// Classify a single task against `now`.
pub fn standing(task: &Task, now: DateTime<Utc>) -> Standing {
    match task.details {
        TaskDetails::Leave { end, .. } => {
            if end < now {
                Standing::Expired
            } else {
                Standing::Current
            }
        }
        TaskDetails::Meeting { .. } | TaskDetails::Assignment { .. } => {
            if now > task.scheduled_at {
                Standing::Overdue
            } else {
                Standing::Current
            }
        }
    }
}

/// What a migration pass changed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationReport {
    /// Tasks appended to the overdue list.
    pub became_overdue: usize,
    /// Past-due tasks removed from active whose equivalent was already overdue.
    pub already_overdue: usize,
    /// Ended leaves removed from active.
    pub expired_leaves: usize,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.removed() == 0
    }

    /// Total number of entries that left the active list.
    pub fn removed(&self) -> usize {
        self.became_overdue + self.already_overdue + self.expired_leaves
    }
}

/// Move past-due tasks from `active` into `overdue` and drop ended leaves.
///
/// Every past-due task is flagged overdue and leaves `active`, but is only
/// appended to `overdue` when no entry with the same description, assignee
/// and instant is already there. Running this twice with the same `now`
/// changes nothing the second time.
pub fn migrate(active: &mut Vec<Task>, overdue: &mut Vec<Task>, now: DateTime<Utc>) -> MigrationReport {
    let mut report = MigrationReport::default();
    let mut kept = Vec::with_capacity(active.len());

    for mut task in active.drain(..) {
        match standing(&task, now) {
            Standing::Current => kept.push(task),
            Standing::Expired => report.expired_leaves += 1,
            Standing::Overdue => {
                task.overdue = true;
                if find_duplicate(&task, overdue).is_some() {
                    report.already_overdue += 1;
                } else {
                    overdue.push(task);
                    report.became_overdue += 1;
                }
            }
        }
    }
    *active = kept;

    if !report.is_empty() {
        tracing::info!(
            became_overdue = report.became_overdue,
            already_overdue = report.already_overdue,
            expired_leaves = report.expired_leaves,
            "migrated active tasks"
        );
    }
    report
}
