//! Task editing commands for CLI.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand, ValueEnum};
use roomshare_core::task::EVERYONE;
use roomshare_core::{
    IndexRange, MeetingDuration, Priority, RecurrenceSchedule, Task, TaskUpdate, TimeUnit, Verdict,
};

use super::CmdResult;
use crate::parse;
use crate::render;
use crate::session::Session;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Meeting,
    Assignment,
    Leave,
}

#[derive(Args)]
pub struct AddArgs {
    /// meeting, assignment or leave
    kind: KindArg,
    /// Task description
    #[arg(required = true, num_args = 1..)]
    description: Vec<String>,
    /// Meeting start, assignment deadline or first day of leave (dd/mm/yyyy HH:MM)
    #[arg(long, value_parser = parse::date)]
    at: DateTime<Utc>,
    /// Last day of a leave (dd/mm/yyyy HH:MM)
    #[arg(long, value_parser = parse::date)]
    until: Option<DateTime<Utc>>,
    /// Meeting length, in --unit
    #[arg(long)]
    duration: Option<u32>,
    /// Unit of --duration
    #[arg(long, default_value = "hours")]
    unit: TimeUnit,
    /// Person responsible (default: everyone)
    #[arg(long)]
    assignee: Option<String>,
    /// high, medium or low
    #[arg(long)]
    priority: Option<Priority>,
    /// daily, weekly or monthly
    #[arg(long)]
    recur: Option<RecurrenceSchedule>,
}

impl AddArgs {
    fn into_task(self) -> Result<Task, Box<dyn std::error::Error>> {
        let description = self.description.join(" ");
        let assignee = self.assignee.unwrap_or_else(|| EVERYONE.to_string());
        let mut task = match self.kind {
            KindArg::Meeting => {
                let meeting = Task::meeting(description, self.at)?;
                match self.duration {
                    Some(amount) => meeting.with_duration(amount, self.unit),
                    None => meeting,
                }
            }
            KindArg::Assignment => Task::assignment(description, self.at)?,
            KindArg::Leave => {
                let until = self.until.ok_or("a leave needs --until")?;
                Task::leave(description, assignee.clone(), self.at, until)?
            }
        };

        task = task.with_assignee(assignee);
        if let Some(priority) = self.priority {
            task = task.with_priority(priority);
        }
        if let Some(schedule) = self.recur {
            task = task.with_recurrence(schedule);
        }
        Ok(task)
    }
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(value_parser = parse::index)]
    index: usize,
    /// New description
    #[arg(long)]
    description: Option<String>,
    /// New date (dd/mm/yyyy HH:MM)
    #[arg(long, value_parser = parse::date)]
    at: Option<DateTime<Utc>>,
    /// New person responsible
    #[arg(long)]
    assignee: Option<String>,
    /// New meeting length, in --unit
    #[arg(long)]
    duration: Option<u32>,
    /// Unit of --duration
    #[arg(long, default_value = "hours")]
    unit: TimeUnit,
}

#[derive(Subcommand)]
pub enum SubtaskAction {
    /// Add comma-separated subtasks to an assignment
    Add {
        #[arg(value_parser = parse::index)]
        index: usize,
        /// e.g. "outline,draft,proofread"
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },
    /// Mark a subtask as done
    Done {
        #[arg(value_parser = parse::index)]
        index: usize,
        #[arg(value_parser = parse::index)]
        subtask: usize,
    },
}

pub fn add(args: AddArgs, session: &mut Session) -> CmdResult {
    let task = args.into_task()?;
    let position = session.store.add(task)?;
    let added = session.store.get(position)?;
    println!("Added: {}", render::task(added));
    println!("You now have {} task(s) in the list.", session.store.active().len());
    Ok(())
}

pub fn update(args: UpdateArgs, session: &mut Session) -> CmdResult {
    let changes = TaskUpdate {
        description: args.description,
        scheduled_at: args.at,
        assignee: args.assignee,
        duration: args
            .duration
            .map(|amount| MeetingDuration { amount, unit: args.unit }),
    };
    if changes.is_empty() {
        return Err("nothing to update: pass --description, --at, --assignee or --duration".into());
    }
    let position = session.store.update(args.index, &changes)?;
    println!("Updated: {}", render::task(session.store.get(position)?));
    Ok(())
}

pub fn done(range: IndexRange, session: &mut Session) -> CmdResult {
    session.store.mark_done(range)?;
    println!("Marked {} task(s) as done.", range.count());
    Ok(())
}

pub fn delete(range: IndexRange, session: &mut Session) -> CmdResult {
    let count = session.store.delete(range)?;
    println!("Deleted {count} task(s).");
    Ok(())
}

pub fn restore(index: usize, session: &mut Session) -> CmdResult {
    session.store.restore(index)?;
    println!("Task restored.");
    Ok(())
}

pub fn remove_overdue(range: IndexRange, session: &mut Session) -> CmdResult {
    let count = session.store.remove_overdue(range)?;
    println!("Removed {count} overdue task(s).");
    Ok(())
}

pub fn reschedule(range: IndexRange, at: DateTime<Utc>, session: &mut Session) -> CmdResult {
    let count = session.store.reschedule_overdue(range, at)?;
    println!("Rescheduled {count} task(s).");
    Ok(())
}

pub fn priority(index: usize, level: Priority, session: &mut Session) -> CmdResult {
    session.store.set_priority(index, level)?;
    println!("Priority set to {level}.");
    Ok(())
}

pub fn snooze(index: usize, amount: i64, unit: TimeUnit, session: &mut Session) -> CmdResult {
    session.store.snooze(index, amount, unit)?;
    println!("Snoozed by {amount} {unit}.");
    Ok(())
}

pub fn reorder(first: usize, second: usize, session: &mut Session) -> CmdResult {
    session.store.reorder(first, second)?;
    println!("Swapped tasks {} and {}.", first + 1, second + 1);
    Ok(())
}

pub fn subtask(action: SubtaskAction, session: &mut Session) -> CmdResult {
    match action {
        SubtaskAction::Add { index, names } => {
            let joined = names.join(" ");
            let added = session
                .store
                .add_subtasks(index, joined.split(',').map(str::trim))?;
            println!("Added {added} subtask(s).");
        }
        SubtaskAction::Done { index, subtask } => {
            session.store.complete_subtask(index, subtask)?;
            println!("Subtask marked as done.");
        }
    }
    Ok(())
}

pub fn reopen(index: usize, at: DateTime<Utc>, session: &mut Session) -> CmdResult {
    match session.store.reopen(index, at)? {
        Verdict::NoConflict => println!("Task reopened."),
        verdict => {
            let reason = verdict.into_result().err().map(|e| e.to_string()).unwrap_or_default();
            println!("Date changed, but the task stays done: {reason}");
        }
    }
    Ok(())
}
