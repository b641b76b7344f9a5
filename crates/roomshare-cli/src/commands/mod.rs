pub mod config;
pub mod list;
pub mod shell;
pub mod task;

use crate::render;
use crate::session::Session;
use crate::Commands;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Run one command against a loaded session. Saving is up to the caller.
pub fn execute(command: Commands, session: &mut Session) -> CmdResult {
    if !matches!(command, Commands::Config { .. } | Commands::Shell) {
        let report = session.refresh();
        if let Some(notice) = render::migration(&report.migration) {
            println!("{notice}");
        }
    }

    match command {
        Commands::Add(args) => task::add(args, session),
        Commands::Update(args) => task::update(args, session),
        Commands::List => list::list(session),
        Commands::Completed => list::completed(session),
        Commands::Overdue => list::overdue(session),
        Commands::Deleted => list::deleted(session),
        Commands::Done { range } => task::done(range, session),
        Commands::Delete { range } => task::delete(range, session),
        Commands::Restore { index } => task::restore(index, session),
        Commands::RemoveOverdue { range } => task::remove_overdue(range, session),
        Commands::Reschedule { range, at } => task::reschedule(range, at, session),
        Commands::Find { keyword } => list::find(&keyword.join(" "), session),
        Commands::Priority { index, level } => task::priority(index, level, session),
        Commands::Sort { policy } => list::sort(policy, session),
        Commands::Snooze {
            index,
            amount,
            unit,
        } => task::snooze(index, amount, unit, session),
        Commands::Reorder { first, second } => task::reorder(first, second, session),
        Commands::Subtask { action } => task::subtask(action, session),
        Commands::Show { user } => list::show(&user, session),
        Commands::Reopen { index, at } => task::reopen(index, at, session),
        Commands::Log => list::log(session),
        Commands::Config { action } => config::run(action, session),
        Commands::Shell => Err("already in the interactive shell".into()),
    }
}
