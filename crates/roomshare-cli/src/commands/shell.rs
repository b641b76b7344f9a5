//! Interactive mode: the same commands, one per line, saved on `bye`.

use std::io::{BufRead, Write};

use clap::Parser;

use super::CmdResult;
use crate::session::Session;
use crate::Cli;

pub fn run(session: &mut Session) -> CmdResult {
    println!("Welcome to RoomShare! Type `help` for commands and `bye` to save and exit.");
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "bye" {
            break;
        }

        let words = match shell_words::split(trimmed) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("error: {e}");
                continue;
            }
        };
        match Cli::try_parse_from(std::iter::once("roomshare".to_string()).chain(words)) {
            Ok(cli) => {
                if let Err(e) = super::execute(cli.command, session) {
                    eprintln!("error: {e}");
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }

    session.save()?;
    println!("Bye! Your tasks have been saved.");
    Ok(())
}
