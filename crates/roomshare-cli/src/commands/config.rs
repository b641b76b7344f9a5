use clap::Subcommand;
use roomshare_core::storage::Config;

use super::CmdResult;
use crate::session::Session;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "list.default_sort", "log.level")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction, session: &mut Session) -> CmdResult {
    let path = session.config_path();
    match action {
        ConfigAction::Get { key } => match session.config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            session.config.set(&key, &value)?;
            session.config.save_to(&path)?;
            if key == "list.default_sort" {
                session.store.set_sort_policy(session.config.list.default_sort);
            }
            println!("ok");
        }
        ConfigAction::List => {
            for (key, value) in session.config.entries() {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Reset => {
            session.config = Config::default();
            session.config.save_to(&path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
