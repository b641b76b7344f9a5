//! Plain-text rendering of tasks and reports.

use chrono::{DateTime, Local, Utc};
use roomshare_core::{MigrationReport, Progress, RecurrenceSchedule, Task, TaskDetails};

fn instant(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d %B %Y %I:%M%p").to_string()
}

/// One task without its number.
pub fn task(task: &Task) -> String {
    let mark = if task.done { "[X]" } else { "[ ]" };
    let mut line = match &task.details {
        TaskDetails::Meeting { duration } => {
            let mut text = format!(
                "[M]{mark} {} ({}) (At: {})",
                task.description,
                task.assignee,
                instant(task.scheduled_at)
            );
            if let Some(d) = duration {
                text.push_str(&format!(" ({} {})", d.amount, d.unit));
            }
            text
        }
        TaskDetails::Assignment { .. } => format!(
            "[A]{mark} {} ({}) (By: {})",
            task.description,
            task.assignee,
            instant(task.scheduled_at)
        ),
        TaskDetails::Leave { start, end } => format!(
            "[L] {} ({}) (From: {} To: {})",
            task.description,
            task.assignee,
            instant(*start),
            instant(*end)
        ),
    };

    if task.recurrence != RecurrenceSchedule::None {
        line.push_str(&format!(" (recurs {})", task.recurrence));
    }
    if task.overdue {
        line.push_str(" (overdue)");
    }
    line.push_str(&format!(" (priority: {})", task.priority));
    line
}

/// Numbered lines for `(index, task)` pairs, including subtasks.
pub fn numbered<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = (usize, &'a Task)>,
{
    let mut lines = Vec::new();
    for (index, t) in entries {
        lines.push(format!("\t{}. {}", index + 1, task(t)));
        for (j, sub) in t.subtasks().unwrap_or_default().iter().enumerate() {
            let mark = if sub.done { "[X]" } else { "[ ]" };
            lines.push(format!("\t\t{}. {mark} {}", j + 1, sub.description));
        }
    }
    lines
}

/// Print a titled, numbered list or `empty` when there is nothing to show.
pub fn print_list<'a, I>(title: &str, entries: I, empty: &str)
where
    I: IntoIterator<Item = (usize, &'a Task)>,
{
    let lines = numbered(entries);
    if lines.is_empty() {
        println!("{empty}");
        return;
    }
    println!("{title}");
    for line in lines {
        println!("{line}");
    }
}

pub fn progress(label: &str, progress: Progress) -> String {
    format!(
        "{label}: {}/{} done ({}%)",
        progress.done,
        progress.total,
        progress.percent()
    )
}

/// One-line notice about tasks that left the active list, if any did.
pub fn migration(report: &MigrationReport) -> Option<String> {
    if report.is_empty() {
        return None;
    }
    let mut parts = Vec::new();
    if report.became_overdue + report.already_overdue > 0 {
        parts.push(format!(
            "{} task(s) moved to overdue",
            report.became_overdue + report.already_overdue
        ));
    }
    if report.expired_leaves > 0 {
        parts.push(format!("{} leave(s) expired", report.expired_leaves));
    }
    Some(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use roomshare_core::{Priority, TimeUnit};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2099, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn meeting_line_shows_duration_and_priority() {
        let meeting = Task::meeting("sync", at())
            .unwrap()
            .with_duration(2, TimeUnit::Hours)
            .with_priority(Priority::High);
        let line = task(&meeting);
        assert!(line.starts_with("[M][ ] sync (everyone) (At: "));
        assert!(line.contains("(2 hours)"));
        assert!(line.ends_with("(priority: high)"));
    }

    #[test]
    fn assignments_list_their_subtasks() {
        let mut essay = Task::assignment("essay", at()).unwrap().with_assignee("harry");
        roomshare_core::task::subtask::append_unique(essay.subtasks_mut().unwrap(), ["draft"]).unwrap();
        let lines = numbered([(0, &essay)]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\t1. [A][ ] essay (harry) (By: "));
        assert_eq!(lines[1], "\t\t1. [ ] draft");
    }

    #[test]
    fn empty_migration_has_no_notice() {
        assert_eq!(migration(&MigrationReport::default()), None);
        let report = MigrationReport {
            became_overdue: 2,
            already_overdue: 0,
            expired_leaves: 1,
        };
        assert_eq!(
            migration(&report).as_deref(),
            Some("2 task(s) moved to overdue, 1 leave(s) expired")
        );
    }
}
