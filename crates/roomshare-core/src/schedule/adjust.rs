//! Date shifting, completion and reopening of individual tasks.

use chrono::{DateTime, Utc};

use super::conflict::{classify_excluding, Verdict};
use crate::error::TaskError;
use crate::task::{Task, TimeUnit};

/// Push `task` later by `amount` of `unit`.
///
/// # Errors
///
/// [`TaskError::InvalidAmount`] for a negative amount or a shift that
/// overflows the calendar. The task is untouched on error.
pub fn snooze(task: &mut Task, amount: i64, unit: TimeUnit) -> Result<(), TaskError> {
    if amount < 0 {
        return Err(TaskError::InvalidAmount(amount));
    }
    let shifted = unit
        .shift(task.scheduled_at, amount)
        .ok_or(TaskError::InvalidAmount(amount))?;
    task.set_scheduled_at(shifted).map_err(|_| TaskError::InvalidAmount(amount))?;
    tracing::debug!(id = %task.id, amount, %unit, "snoozed task");
    Ok(())
}

/// Mark the task at `index` as done. Leaves cannot be completed.
pub fn mark_done(tasks: &mut [Task], index: usize) -> Result<(), TaskError> {
    let len = tasks.len();
    let task = tasks
        .get_mut(index)
        .ok_or(TaskError::OutOfRange { index, len })?;
    if task.is_leave() {
        return Err(TaskError::LeaveCannotBeDone { index });
    }
    task.done = true;
    Ok(())
}

/// Give the task at `index` a new date and re-validate it against the rest
/// of `active`.
///
/// The new date is committed before validation, so a conflicting verdict
/// leaves the task re-dated but still done. `done` is cleared only when the
/// verdict is [`Verdict::NoConflict`].
pub fn reopen(active: &mut [Task], index: usize, new_date: DateTime<Utc>) -> Result<Verdict, TaskError> {
    let len = active.len();
    active
        .get_mut(index)
        .ok_or(TaskError::OutOfRange { index, len })?
        .set_scheduled_at(new_date)?;

    let verdict = classify_excluding(&active[index], active, Some(index));
    if verdict.is_clear() {
        active[index].done = false;
    } else {
        tracing::info!(index, ?verdict, "reopen rejected by conflict check");
    }
    Ok(verdict)
}
