//! Duplicate and time-clash detection.
//!
//! Classification is a pure query over the active list: it never mutates
//! anything, so callers can retry it freely. Insertion should proceed only on
//! [`Verdict::NoConflict`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaskError;
use crate::task::Task;

/// Outcome of checking a candidate against the active list.
///
/// Conflicting variants carry the index of the first offending entry in the
/// list's current iteration order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "verdict", content = "index", rename_all = "snake_case")]
pub enum Verdict {
    NoConflict,
    Duplicate(usize),
    TimeClash(usize),
}

impl Verdict {
    pub fn is_clear(&self) -> bool {
        matches!(self, Verdict::NoConflict)
    }

    /// Turn a conflicting verdict into the matching error kind.
    pub fn into_result(self) -> Result<(), TaskError> {
        match self {
            Verdict::NoConflict => Ok(()),
            Verdict::Duplicate(index) => Err(TaskError::DuplicateTask { index }),
            Verdict::TimeClash(index) => Err(TaskError::TimeClash { index }),
        }
    }
}

/// Classify `candidate` against every entry of `active`.
pub fn classify(candidate: &Task, active: &[Task]) -> Verdict {
    classify_excluding(candidate, active, None)
}

/// Classify `candidate`, ignoring the entry at `skip`.
///
/// Used when the candidate already lives in `active` (reopen, update), so it is never
/// reported as conflicting with itself.
pub fn classify_excluding(candidate: &Task, active: &[Task], skip: Option<usize>) -> Verdict {
    let duplicate = others(active, skip).find(|(_, existing)| existing.same_entry(candidate));
    if let Some((index, _)) = duplicate {
        tracing::debug!(description = %candidate.description, index, "duplicate task detected");
        return Verdict::Duplicate(index);
    }

    // Only meetings occupy time; every other kind passes this stage.
    let Some(span) = candidate.occupied_interval() else {
        return Verdict::NoConflict;
    };
    for (index, existing) in others(active, skip) {
        if let Some(other) = existing.occupied_interval() {
            if spans_clash(span, other) {
                tracing::debug!(description = %candidate.description, index, "time clash detected");
                return Verdict::TimeClash(index);
            }
        }
    }

    Verdict::NoConflict
}

fn others(active: &[Task], skip: Option<usize>) -> impl Iterator<Item = (usize, &Task)> {
    active
        .iter()
        .enumerate()
        .filter(move |(i, _)| Some(*i) != skip)
}

/// Index of the first entry in `list` with the same duplicate key as `candidate`.
pub fn find_duplicate(candidate: &Task, list: &[Task]) -> Option<usize> {
    list.iter().position(|existing| existing.same_entry(candidate))
}

/// Whether two meetings occupy overlapping time. Always false if either task
/// is not a meeting.
pub fn meetings_clash(a: &Task, b: &Task) -> bool {
    match (a.occupied_interval(), b.occupied_interval()) {
        (Some(x), Some(y)) => spans_clash(x, y),
        _ => false,
    }
}

/// Closed spans clash unless one ends strictly before the other starts.
///
/// Touching endpoints count as a clash, and so do two zero-width spans at
/// the same instant.
fn spans_clash(a: (DateTime<Utc>, DateTime<Utc>), b: (DateTime<Utc>, DateTime<Utc>)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}
