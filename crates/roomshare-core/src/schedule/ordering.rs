//! Sort policies for the active list.
//!
//! Every policy shares one rule: unfinished tasks come before finished ones.
//! The policy key only orders tasks with the same `done` flag, and the sort
//! is stable so equal keys keep their previous relative order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::TaskError;
use crate::task::Task;

/// How the active list is ordered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortPolicy {
    /// High, then medium, then low.
    #[default]
    Priority,
    /// Byte order of the description (case-sensitive).
    Alphabetical,
    /// Earliest scheduled instant first.
    Deadline,
    /// Meetings, then assignments, then leaves.
    Type,
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortPolicy::Priority => write!(f, "priority"),
            SortPolicy::Alphabetical => write!(f, "alphabetical"),
            SortPolicy::Deadline => write!(f, "deadline"),
            SortPolicy::Type => write!(f, "type"),
        }
    }
}

impl FromStr for SortPolicy {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Ok(SortPolicy::Priority),
            "alphabetical" => Ok(SortPolicy::Alphabetical),
            "deadline" => Ok(SortPolicy::Deadline),
            "type" => Ok(SortPolicy::Type),
            _ => Err(TaskError::InvalidSortPolicy(s.to_string())),
        }
    }
}

/// Compare two tasks: `done` first, then the policy key.
pub fn compare(a: &Task, b: &Task, policy: SortPolicy) -> Ordering {
    a.done.cmp(&b.done).then_with(|| match policy {
        SortPolicy::Priority => a.priority.cmp(&b.priority),
        SortPolicy::Alphabetical => a.description.cmp(&b.description),
        SortPolicy::Deadline => a.scheduled_at.cmp(&b.scheduled_at),
        SortPolicy::Type => a.kind().cmp(&b.kind()),
    })
}

/// Stable in-place sort of `tasks` under `policy`.
pub fn sort(tasks: &mut [Task], policy: SortPolicy) {
    tasks.sort_by(|a, b| compare(a, b, policy));
    tracing::debug!(%policy, count = tasks.len(), "sorted tasks");
}
