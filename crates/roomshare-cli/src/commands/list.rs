//! Read-only views, sorting and log export.

use chrono::Utc;
use roomshare_core::storage::write_log;
use roomshare_core::SortPolicy;

use super::CmdResult;
use crate::render;
use crate::session::Session;

/// Unfinished tasks, numbered by their place in the full list.
pub fn list(session: &mut Session) -> CmdResult {
    let store = &session.store;
    render::print_list("Your tasks:", store.pending(), "There are no tasks in your list.");
    if !store.active().is_empty() {
        println!("{}", render::progress("Progress", store.progress()));
    }
    Ok(())
}

pub fn completed(session: &mut Session) -> CmdResult {
    render::print_list(
        "Completed tasks:",
        session.store.completed(),
        "There are no completed tasks.",
    );
    Ok(())
}

pub fn overdue(session: &mut Session) -> CmdResult {
    render::print_list(
        "Overdue tasks:",
        session.store.overdue().iter().enumerate(),
        "There are no overdue tasks.",
    );
    Ok(())
}

pub fn deleted(session: &mut Session) -> CmdResult {
    render::print_list(
        "Deleted tasks:",
        session.store.deleted().iter().enumerate(),
        "There are no deleted tasks.",
    );
    Ok(())
}

pub fn find(keyword: &str, session: &mut Session) -> CmdResult {
    render::print_list(
        "Matching tasks:",
        session.store.find(keyword),
        "Your search returned no results. Try another keyword.",
    );
    Ok(())
}

pub fn show(user: &str, session: &mut Session) -> CmdResult {
    let view = session.store.tagged(user)?;
    render::print_list(&format!("Tasks for {user}:"), view.tasks, "");
    println!("{}", render::progress(user, view.progress));
    Ok(())
}

/// Change the sort policy and remember it as the default.
pub fn sort(policy: SortPolicy, session: &mut Session) -> CmdResult {
    session.store.set_sort_policy(policy);
    session.config.list.default_sort = policy;
    session.config.save_to(&session.config_path())?;
    println!("Sorted by {policy}.");
    Ok(())
}

pub fn log(session: &mut Session) -> CmdResult {
    let store = &session.store;
    let mut lines = vec!["Active:".to_string()];
    lines.extend(render::numbered(store.active().iter().enumerate()));
    lines.push("Overdue:".to_string());
    lines.extend(render::numbered(store.overdue().iter().enumerate()));

    let path = write_log(&session.log_dir(), lines, Utc::now())?;
    println!("Log written to {}", path.display());
    Ok(())
}
