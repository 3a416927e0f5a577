//! Parsing of terminal input into view commands.

use std::str::FromStr;
use thiserror::Error;

/// A line typed at the prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add <title>`; the title may be empty, which the view ignores
    Add(String),
    /// `toggle <n>`
    Toggle(usize),
    /// `edit <n>`
    Edit(usize),
    /// `delete <n>` / `rm <n>`
    Delete(usize),
    /// `list` / `ls`
    List,
    /// `help`
    Help,
    /// `quit` / `exit`
    Quit,
}

/// Why a line could not be parsed
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("empty command")]
    Empty,
    /// First word is not a known command
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    /// A command that needs a position got none
    #[error("`{0}` needs a todo number")]
    MissingPosition(&'static str),
    /// The position is not a positive integer
    #[error("not a todo number: {0}")]
    InvalidPosition(String),
}

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  add <title>     add a todo
  toggle <n>      mark todo n done / not done
  edit <n>        change the title of todo n
  delete <n>      delete todo n (alias: rm)
  list            reload the list (alias: ls)
  help            show this help
  quit            leave (alias: exit)";

fn position(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingPosition(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidPosition(arg.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add(rest.to_string())),
            "toggle" => position("toggle", rest).map(Self::Toggle),
            "edit" => position("edit", rest).map(Self::Edit),
            "delete" | "rm" => position("delete", rest).map(Self::Delete),
            "list" | "ls" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}
