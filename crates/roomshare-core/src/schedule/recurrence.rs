//! Recurring task roll-forward.
//!
//! A recurring task whose instant has passed is moved to its next occurrence
//! at or after "now" and reset to unfinished, instead of going overdue.

use chrono::{DateTime, Utc};

use crate::task::{RecurrenceSchedule, Task, TimeUnit};

/// The `n`th occurrence after `anchor`, or `None` for non-recurring schedules.
///
/// Occurrences are computed from the anchor rather than chained, so a
/// monthly task on the 31st returns to the 31st whenever the month allows.
pub fn occurrence(schedule: RecurrenceSchedule, anchor: DateTime<Utc>, n: u32) -> Option<DateTime<Utc>> {
    let n = i64::from(n);
    match schedule {
        RecurrenceSchedule::None => None,
        RecurrenceSchedule::Daily => TimeUnit::Days.shift(anchor, n),
        RecurrenceSchedule::Weekly => TimeUnit::Days.shift(anchor, 7 * n),
        RecurrenceSchedule::Monthly => TimeUnit::Months.shift(anchor, n),
    }
}

/// First occurrence of `schedule` from `anchor` that is not before `now`.
pub fn next_after(schedule: RecurrenceSchedule, anchor: DateTime<Utc>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if anchor >= now {
        return Some(anchor);
    }
    let mut n = 1;
    loop {
        let candidate = occurrence(schedule, anchor, n)?;
        if candidate >= now {
            return Some(candidate);
        }
        n = n.checked_add(1)?;
    }
}

/// Advance every past recurring task in `tasks` to its next occurrence.
///
/// Rolled tasks are reset to unfinished, including their subtasks. Returns
/// the number of tasks moved.
pub fn roll_forward(tasks: &mut [Task], now: DateTime<Utc>) -> usize {
    let mut rolled = 0;
    for task in tasks.iter_mut() {
        if !task.recurs || task.scheduled_at >= now {
            continue;
        }
        let Some(next) = next_after(task.recurrence, task.scheduled_at, now) else {
            continue;
        };
        if task.set_scheduled_at(next).is_err() {
            continue;
        }
        task.done = false;
        task.overdue = false;
        if let Some(subtasks) = task.subtasks_mut() {
            subtasks.iter_mut().for_each(|s| s.done = false);
        }
        rolled += 1;
    }

    if rolled > 0 {
        tracing::info!(rolled, "rolled recurring tasks forward");
    }
    rolled
}
