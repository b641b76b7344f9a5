use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use roomshare_core::storage::{self, Config};
use roomshare_core::{IndexRange, Priority, SortPolicy, TimeUnit};
use tracing_subscriber::EnvFilter;

mod commands;
mod parse;
mod render;
mod session;

use session::Session;

#[derive(Parser)]
#[command(name = "roomshare", version, about = "RoomShare shared household planner")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a meeting, assignment or leave
    Add(commands::task::AddArgs),
    /// Edit the description, date, assignee or duration of a task
    Update(commands::task::UpdateArgs),
    /// Show the task list with progress
    List,
    /// Show finished tasks
    Completed,
    /// Show overdue tasks
    Overdue,
    /// Show tasks deleted in this session
    Deleted,
    /// Mark tasks as done (e.g. `3` or `2-4`)
    Done {
        #[arg(value_parser = parse::range)]
        range: IndexRange,
    },
    /// Delete tasks (e.g. `3` or `2-4`)
    Delete {
        #[arg(value_parser = parse::range)]
        range: IndexRange,
    },
    /// Bring a deleted task back
    Restore {
        #[arg(value_parser = parse::index)]
        index: usize,
    },
    /// Delete overdue tasks
    RemoveOverdue {
        #[arg(value_parser = parse::range)]
        range: IndexRange,
    },
    /// Give overdue tasks a new date and move them back to the list
    Reschedule {
        #[arg(value_parser = parse::range)]
        range: IndexRange,
        /// New date, dd/mm/yyyy HH:MM
        #[arg(long, value_parser = parse::date)]
        at: DateTime<Utc>,
    },
    /// Search descriptions
    Find {
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
    },
    /// Set the priority of a task
    Priority {
        #[arg(value_parser = parse::index)]
        index: usize,
        /// high, medium or low
        level: Priority,
    },
    /// Change how the list is sorted
    Sort {
        /// priority, alphabetical, deadline or type
        policy: SortPolicy,
    },
    /// Push a task later
    Snooze {
        #[arg(value_parser = parse::index)]
        index: usize,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// minutes, hours, days or months
        unit: TimeUnit,
    },
    /// Swap two tasks
    Reorder {
        #[arg(value_parser = parse::index)]
        first: usize,
        #[arg(value_parser = parse::index)]
        second: usize,
    },
    /// Manage the subtasks of an assignment
    Subtask {
        #[command(subcommand)]
        action: commands::task::SubtaskAction,
    },
    /// Show the tasks of one person
    Show { user: String },
    /// Re-date a finished task and mark it as not done
    Reopen {
        #[arg(value_parser = parse::index)]
        index: usize,
        /// New date, dd/mm/yyyy HH:MM
        #[arg(long, value_parser = parse::date)]
        at: DateTime<Utc>,
    },
    /// Write the task list to a timestamped log file
    Log,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive mode; `bye` saves and exits
    Shell,
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(level))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = storage::data_dir()?;
    let loaded = Config::load_from(&Config::path_in(&dir));
    let level = match &loaded {
        Ok(config) => config.log.level.as_str(),
        Err(_) => "warn",
    };
    init_tracing(level);
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        Config::default()
    });

    let mut session = Session::open(dir, config);
    match cli.command {
        Commands::Shell => commands::shell::run(&mut session),
        command => {
            let result = commands::execute(command, &mut session);
            let saved = session.save();
            result?;
            saved?;
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
