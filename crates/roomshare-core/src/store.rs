//! The task store: single owner of the active, overdue and deleted lists.
//!
//! Every list operation the command layer performs goes through a
//! [`TaskStore`], which keeps the active list ordered under the current
//! [`SortPolicy`] and validates indices itself. Indices are 0-based and refer
//! to the list's current order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TaskError;
use crate::schedule::{
    adjust, classify, classify_excluding, lifecycle, ordering, recurrence, MigrationReport, SortPolicy, Verdict,
};
use crate::task::{subtask, Priority, Task, TaskKind, TaskUpdate, TimeUnit};

/// Inclusive range of 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    /// Range covering `a..=b`, in whichever order the bounds were given.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(index: usize) -> Self {
        Self::new(index, index)
    }

    /// Number of indices covered; never zero.
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    fn check(&self, len: usize, list: &'static str) -> Result<(), TaskError> {
        if len == 0 {
            return Err(TaskError::EmptyCollection(list));
        }
        if self.end >= len {
            return Err(TaskError::OutOfRange { index: self.end, len });
        }
        Ok(())
    }
}

/// What a refresh pass changed.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RefreshReport {
    pub rolled_forward: usize,
    pub migration: MigrationReport,
}

/// Completion counts over a set of tasks.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub done: usize,
}

impl Progress {
    /// Whole-number completion percentage; 0 when there is nothing to do.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.done * 100) / self.total) as u8
    }
}

/// Tasks visible to one assignee.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedView<'a> {
    /// `(index in active, task)` for every task assigned to the user or to everyone.
    pub tasks: Vec<(usize, &'a Task)>,
    pub progress: Progress,
}

/// Owner of the task lists and the current sort policy.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    active: Vec<Task>,
    overdue: Vec<Task>,
    deleted: Vec<Task>,
    policy: SortPolicy,
}

impl TaskStore {
    /// Build a store from loaded lists. The active list is sorted immediately.
    pub fn new(active: Vec<Task>, overdue: Vec<Task>, policy: SortPolicy) -> Self {
        let mut store = Self {
            active,
            overdue,
            deleted: Vec::new(),
            policy,
        };
        store.resort();
        store
    }

    /// Build a store from persisted lists without re-sorting, so a manual
    /// [`reorder`](Self::reorder) survives a save and reload.
    pub fn with_saved_order(active: Vec<Task>, overdue: Vec<Task>, policy: SortPolicy) -> Self {
        Self {
            active,
            overdue,
            deleted: Vec::new(),
            policy,
        }
    }

    pub fn active(&self) -> &[Task] {
        &self.active
    }

    pub fn overdue(&self) -> &[Task] {
        &self.overdue
    }

    pub fn deleted(&self) -> &[Task] {
        &self.deleted
    }

    pub fn sort_policy(&self) -> SortPolicy {
        self.policy
    }

    /// Task at `index` in the active list.
    pub fn get(&self, index: usize) -> Result<&Task, TaskError> {
        let len = self.active.len();
        self.active.get(index).ok_or(TaskError::OutOfRange { index, len })
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Task, TaskError> {
        let len = self.active.len();
        self.active
            .get_mut(index)
            .ok_or(TaskError::OutOfRange { index, len })
    }

    /// Re-apply the current sort policy to the active and overdue lists.
    pub fn resort(&mut self) {
        ordering::sort(&mut self.active, self.policy);
        ordering::sort(&mut self.overdue, self.policy);
    }

    /// Switch the sort policy and re-order immediately.
    pub fn set_sort_policy(&mut self, policy: SortPolicy) {
        self.policy = policy;
        self.resort();
        tracing::info!(%policy, "sort policy changed");
    }

    /// Insert `task` if it conflicts with nothing in the active list.
    ///
    /// Returns the task's position after re-sorting.
    ///
    /// # Errors
    ///
    /// [`TaskError::DuplicateTask`] or [`TaskError::TimeClash`]; the store is
    /// unchanged on error.
    pub fn add(&mut self, task: Task) -> Result<usize, TaskError> {
        classify(&task, &self.active).into_result()?;
        let id = task.id.clone();
        tracing::info!(%id, kind = %task.kind(), "task added");
        self.active.push(task);
        self.resort();
        Ok(self.position_of(&id).unwrap_or(self.active.len() - 1))
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.active.iter().position(|t| t.id == id)
    }

    /// Edit the active task at `index`.
    ///
    /// The edit is checked against every other active task before it is
    /// committed. Returns the task's position after re-sorting.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotAMeeting`] for a duration on another kind, the
    /// conflict errors of [`add`](Self::add), or a field validation error.
    /// The store is unchanged on error.
    pub fn update(&mut self, index: usize, update: &TaskUpdate) -> Result<usize, TaskError> {
        let current = self.get(index)?;
        if update.duration.is_some() && current.kind() != TaskKind::Meeting {
            return Err(TaskError::NotAMeeting { index });
        }
        let mut edited = current.clone();
        edited.apply(update)?;
        classify_excluding(&edited, &self.active, Some(index)).into_result()?;

        let id = edited.id.clone();
        self.active[index] = edited;
        self.resort();
        tracing::info!(%id, "task updated");
        Ok(self.position_of(&id).unwrap_or(index))
    }

    /// Move the active tasks in `range` to the deleted list.
    pub fn delete(&mut self, range: IndexRange) -> Result<usize, TaskError> {
        range.check(self.active.len(), "active")?;
        let removed: Vec<Task> = self.active.drain(range.iter()).collect();
        let count = removed.len();
        self.deleted.extend(removed);
        tracing::info!(count, "tasks deleted");
        Ok(count)
    }

    /// Move the deleted task at `index` back into the active list.
    pub fn restore(&mut self, index: usize) -> Result<(), TaskError> {
        IndexRange::single(index).check(self.deleted.len(), "deleted")?;
        let task = self.deleted.remove(index);
        tracing::info!(id = %task.id, "task restored");
        self.active.push(task);
        self.resort();
        Ok(())
    }

    /// Mark every active task in `range` as done.
    ///
    /// The whole range is validated first; if any entry is a leave nothing
    /// is marked.
    pub fn mark_done(&mut self, range: IndexRange) -> Result<(), TaskError> {
        range.check(self.active.len(), "active")?;
        if let Some(index) = range.iter().find(|&i| self.active[i].is_leave()) {
            return Err(TaskError::LeaveCannotBeDone { index });
        }
        for index in range.iter() {
            adjust::mark_done(&mut self.active, index)?;
        }
        self.resort();
        Ok(())
    }

    /// Append subtasks to the assignment at `index`.
    pub fn add_subtasks<I, S>(&mut self, index: usize, names: I) -> Result<usize, TaskError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self
            .get_mut(index)?
            .subtasks_mut()
            .ok_or(TaskError::NotAnAssignment { index })?;
        subtask::append_unique(list, names)
    }

    /// Mark subtask `sub` of the assignment at `index` as done.
    pub fn complete_subtask(&mut self, index: usize, sub: usize) -> Result<(), TaskError> {
        let list = self
            .get_mut(index)?
            .subtasks_mut()
            .ok_or(TaskError::NotAnAssignment { index })?;
        subtask::complete(list, sub)
    }

    pub fn set_priority(&mut self, index: usize, priority: Priority) -> Result<(), TaskError> {
        self.get_mut(index)?.priority = priority;
        self.resort();
        Ok(())
    }

    /// Swap two active tasks. The manual order holds until the next re-sort.
    pub fn reorder(&mut self, first: usize, second: usize) -> Result<(), TaskError> {
        let len = self.active.len();
        IndexRange::new(first, second).check(len, "active")?;
        self.active.swap(first, second);
        Ok(())
    }

    /// Push the active task at `index` later by `amount` of `unit`.
    pub fn snooze(&mut self, index: usize, amount: i64, unit: TimeUnit) -> Result<(), TaskError> {
        adjust::snooze(self.get_mut(index)?, amount, unit)?;
        self.resort();
        Ok(())
    }

    /// Re-date a finished task and clear `done` if it passes the conflict check.
    ///
    /// A conflicting verdict is returned as `Ok`; the date change stays applied.
    pub fn reopen(&mut self, index: usize, new_date: DateTime<Utc>) -> Result<Verdict, TaskError> {
        let verdict = adjust::reopen(&mut self.active, index, new_date)?;
        self.resort();
        Ok(verdict)
    }

    /// Bring the lists up to date with `now`: roll recurring tasks forward,
    /// then migrate overdue tasks and expired leaves.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> RefreshReport {
        let rolled_forward = recurrence::roll_forward(&mut self.active, now);
        let migration = lifecycle::migrate(&mut self.active, &mut self.overdue, now);
        if rolled_forward > 0 || !migration.is_empty() {
            self.resort();
        }
        RefreshReport {
            rolled_forward,
            migration,
        }
    }

    /// Active tasks whose description contains `keyword`, ignoring case.
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        let needle = keyword.trim().to_lowercase();
        self.active
            .iter()
            .enumerate()
            .filter(|(_, t)| t.description.to_lowercase().contains(&needle))
            .collect()
    }

    /// Active tasks belonging to `user`, including tasks for everyone.
    pub fn tagged(&self, user: &str) -> Result<TaggedView<'_>, TaskError> {
        let tasks: Vec<(usize, &Task)> = self
            .active
            .iter()
            .enumerate()
            .filter(|(_, t)| t.matches_assignee(user))
            .collect();
        if tasks.is_empty() {
            return Err(TaskError::EmptyCollection("assigned"));
        }
        let done = tasks.iter().filter(|(_, t)| t.done).count();
        Ok(TaggedView {
            progress: Progress {
                total: tasks.len(),
                done,
            },
            tasks,
        })
    }

    /// Completion over the active list, leaving out leaves and overdue entries.
    pub fn progress(&self) -> Progress {
        let counted = self
            .active
            .iter()
            .filter(|t| !t.overdue && !t.is_leave());
        let (total, done) = counted.fold((0, 0), |(total, done), t| (total + 1, done + usize::from(t.done)));
        Progress { total, done }
    }

    /// Unfinished active tasks with their indices.
    pub fn pending(&self) -> Vec<(usize, &Task)> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.done && !t.overdue)
            .collect()
    }

    /// Finished active tasks with their indices.
    pub fn completed(&self) -> Vec<(usize, &Task)> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, t)| t.done)
            .collect()
    }

    /// Move the overdue tasks in `range` to the deleted list.
    pub fn remove_overdue(&mut self, range: IndexRange) -> Result<usize, TaskError> {
        range.check(self.overdue.len(), "overdue")?;
        let removed: Vec<Task> = self.overdue.drain(range.iter()).collect();
        let count = removed.len();
        self.deleted.extend(removed);
        Ok(count)
    }

    /// Give the overdue tasks in `range` a new date and move them back into
    /// the active list.
    ///
    /// Each re-dated task is checked against the active list and the tasks
    /// already accepted from the same range. Nothing moves unless all pass.
    pub fn reschedule_overdue(&mut self, range: IndexRange, new_date: DateTime<Utc>) -> Result<usize, TaskError> {
        range.check(self.overdue.len(), "overdue")?;

        let mut candidates = Vec::with_capacity(range.count());
        for index in range.iter() {
            let mut task = self.overdue[index].clone();
            task.set_scheduled_at(new_date)?;
            task.overdue = false;
            task.done = false;

            let mut against = self.active.clone();
            against.extend(candidates.iter().cloned());
            classify(&task, &against).into_result()?;
            candidates.push(task);
        }

        self.overdue.drain(range.iter());
        let count = candidates.len();
        self.active.extend(candidates);
        self.resort();
        tracing::info!(count, "overdue tasks rescheduled");
        Ok(count)
    }
}
