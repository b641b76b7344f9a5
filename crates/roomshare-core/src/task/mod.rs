//! Task model: meetings, assignments and leaves.
//!
//! A [`Task`] carries the fields every kind shares (description, scheduled
//! instant, done/overdue flags, priority, assignee, recurrence) and a closed
//! [`TaskDetails`] variant with the per-kind data. The engines match on the
//! variant exhaustively instead of inspecting runtime types.

pub mod subtask;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaskError;

pub use subtask::Subtask;

/// Assignee value that matches every assignee query.
pub const EVERYONE: &str = "everyone";

/// Task priority. Declaration order is display order: high first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(TaskError::InvalidPriority(s.to_string())),
        }
    }
}

/// How often a recurring task repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceSchedule {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Default for RecurrenceSchedule {
    fn default() -> Self {
        RecurrenceSchedule::None
    }
}

impl fmt::Display for RecurrenceSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceSchedule::None => write!(f, "none"),
            RecurrenceSchedule::Daily => write!(f, "daily"),
            RecurrenceSchedule::Weekly => write!(f, "weekly"),
            RecurrenceSchedule::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for RecurrenceSchedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RecurrenceSchedule::None),
            "daily" | "day" => Ok(RecurrenceSchedule::Daily),
            "weekly" | "week" => Ok(RecurrenceSchedule::Weekly),
            "monthly" | "month" => Ok(RecurrenceSchedule::Monthly),
            other => Err(format!("unknown recurrence schedule: {other}")),
        }
    }
}

/// Unit for meeting durations and snooze amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Months,
}

impl TimeUnit {
    /// Shift `at` by `amount` of this unit.
    ///
    /// Minutes, hours and days are fixed-length. Months are calendar months;
    /// the day-of-month is clamped to the last day of the target month.
    /// Returns `None` on overflow.
    pub fn shift(self, at: DateTime<Utc>, amount: i64) -> Option<DateTime<Utc>> {
        match self {
            TimeUnit::Minutes => at.checked_add_signed(Duration::try_minutes(amount)?),
            TimeUnit::Hours => at.checked_add_signed(Duration::try_hours(amount)?),
            TimeUnit::Days => at.checked_add_signed(Duration::try_days(amount)?),
            TimeUnit::Months => {
                let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
                if amount >= 0 {
                    at.checked_add_months(months)
                } else {
                    at.checked_sub_months(months)
                }
            }
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Minutes => write!(f, "minutes"),
            TimeUnit::Hours => write!(f, "hours"),
            TimeUnit::Days => write!(f, "days"),
            TimeUnit::Months => write!(f, "months"),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" | "minutes" | "min" | "mins" => Ok(TimeUnit::Minutes),
            "hour" | "hours" | "h" => Ok(TimeUnit::Hours),
            "day" | "days" | "d" => Ok(TimeUnit::Days),
            "month" | "months" | "mo" => Ok(TimeUnit::Months),
            _ => Err(TaskError::InvalidTimeUnit(s.to_string())),
        }
    }
}

/// Length of a meeting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingDuration {
    pub amount: u32,
    pub unit: TimeUnit,
}

/// Plain discriminant of [`TaskDetails`]. Declaration order is `type` sort order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Meeting,
    Assignment,
    Leave,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Meeting => write!(f, "meeting"),
            TaskKind::Assignment => write!(f, "assignment"),
            TaskKind::Leave => write!(f, "leave"),
        }
    }
}

/// Per-kind task data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskDetails {
    /// Occupies `[scheduled_at, scheduled_at + duration]`; a fixed instant when
    /// the duration is absent or zero.
    Meeting {
        #[serde(default)]
        duration: Option<MeetingDuration>,
    },
    /// Work item with its own ordered checklist.
    Assignment {
        #[serde(default)]
        subtasks: Vec<Subtask>,
    },
    /// Absence of the assignee between `start` and `end`.
    Leave {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Field edits for an existing task. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub assignee: Option<String>,
    /// Meetings only.
    pub duration: Option<MeetingDuration>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A scheduled item in the shared list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Identity of this entry. Never part of duplicate detection.
    pub id: String,
    pub description: String,
    /// Deadline of an assignment, start of a meeting, first day of a leave.
    pub scheduled_at: DateTime<Utc>,
    pub done: bool,
    pub overdue: bool,
    pub priority: Priority,
    /// Person responsible, or [`EVERYONE`].
    pub assignee: String,
    pub recurs: bool,
    pub recurrence: RecurrenceSchedule,
    pub details: TaskDetails,
}

impl Task {
    fn with_details(
        description: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        details: TaskDetails,
    ) -> Result<Self, TaskError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        Ok(Task {
            id: uuid::Uuid::new_v4().to_string(),
            description,
            scheduled_at,
            done: false,
            overdue: false,
            priority: Priority::default(),
            assignee: EVERYONE.to_string(),
            recurs: false,
            recurrence: RecurrenceSchedule::None,
            details,
        })
    }

    /// Create a fixed-instant meeting.
    pub fn meeting(description: impl Into<String>, at: DateTime<Utc>) -> Result<Self, TaskError> {
        Self::with_details(description, at, TaskDetails::Meeting { duration: None })
    }

    /// Create an assignment due at `due`.
    pub fn assignment(description: impl Into<String>, due: DateTime<Utc>) -> Result<Self, TaskError> {
        Self::with_details(
            description,
            due,
            TaskDetails::Assignment {
                subtasks: Vec::new(),
            },
        )
    }

    /// Create a leave for `user` from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidLeaveRange`] when `end` precedes `start`.
    pub fn leave(
        description: impl Into<String>,
        user: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, TaskError> {
        if end < start {
            return Err(TaskError::InvalidLeaveRange { start, end });
        }
        let mut task = Self::with_details(description, start, TaskDetails::Leave { start, end })?;
        task.assignee = user.into();
        Ok(task)
    }

    /// Set the meeting length. No effect on other kinds.
    pub fn with_duration(mut self, amount: u32, unit: TimeUnit) -> Self {
        if let TaskDetails::Meeting { duration } = &mut self.details {
            *duration = Some(MeetingDuration { amount, unit });
        }
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the recurrence schedule; `recurs` follows it.
    pub fn with_recurrence(mut self, schedule: RecurrenceSchedule) -> Self {
        self.recurrence = schedule;
        self.recurs = schedule != RecurrenceSchedule::None;
        self
    }

    pub fn kind(&self) -> TaskKind {
        match self.details {
            TaskDetails::Meeting { .. } => TaskKind::Meeting,
            TaskDetails::Assignment { .. } => TaskKind::Assignment,
            TaskDetails::Leave { .. } => TaskKind::Leave,
        }
    }

    pub fn is_leave(&self) -> bool {
        matches!(self.details, TaskDetails::Leave { .. })
    }

    /// End of a leave, `None` for other kinds.
    pub fn leave_end(&self) -> Option<DateTime<Utc>> {
        match self.details {
            TaskDetails::Leave { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Closed span a meeting occupies. `None` for non-meetings.
    ///
    /// A meeting without a duration (or whose end would overflow) occupies
    /// only its start instant.
    pub fn occupied_interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self.details {
            TaskDetails::Meeting { duration } => {
                let start = self.scheduled_at;
                let end = duration
                    .and_then(|d| d.unit.shift(start, i64::from(d.amount)))
                    .unwrap_or(start);
                Some((start, end))
            }
            _ => None,
        }
    }

    /// Duplicate key: exact description, assignee and instant.
    pub fn same_entry(&self, other: &Task) -> bool {
        self.description == other.description
            && self.assignee == other.assignee
            && self.scheduled_at == other.scheduled_at
    }

    /// Whether this task belongs to `user`, honouring the [`EVERYONE`] wildcard.
    pub fn matches_assignee(&self, user: &str) -> bool {
        self.assignee == user || self.assignee == EVERYONE
    }

    /// Move the scheduled instant, keeping a leave's span in step.
    ///
    /// # Errors
    ///
    /// [`TaskError::DateOutOfRange`] when a leave's shifted end falls outside
    /// the supported calendar. The task is untouched on error.
    pub fn set_scheduled_at(&mut self, at: DateTime<Utc>) -> Result<(), TaskError> {
        if let TaskDetails::Leave { start, end } = &mut self.details {
            let new_end = at
                .checked_add_signed(*end - *start)
                .ok_or(TaskError::DateOutOfRange)?;
            *start = at;
            *end = new_end;
        }
        self.scheduled_at = at;
        Ok(())
    }

    /// Apply `update` in place. A duration on a non-meeting is ignored.
    ///
    /// # Errors
    ///
    /// [`TaskError::EmptyDescription`] for a blank description, or the error
    /// from [`set_scheduled_at`](Self::set_scheduled_at). Fields applied
    /// before the failing one stay applied, so callers edit a copy.
    pub fn apply(&mut self, update: &TaskUpdate) -> Result<(), TaskError> {
        if let Some(description) = &update.description {
            if description.trim().is_empty() {
                return Err(TaskError::EmptyDescription);
            }
            self.description = description.clone();
        }
        if let Some(at) = update.scheduled_at {
            self.set_scheduled_at(at)?;
        }
        if let Some(assignee) = &update.assignee {
            self.assignee = assignee.clone();
        }
        if let Some(d) = update.duration {
            if let TaskDetails::Meeting { duration } = &mut self.details {
                *duration = Some(d);
            }
        }
        Ok(())
    }

    pub fn subtasks(&self) -> Option<&[Subtask]> {
        match &self.details {
            TaskDetails::Assignment { subtasks } => Some(subtasks),
            _ => None,
        }
    }
}
