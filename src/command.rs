//! Command-line parsing for the interactive shell.

use std::str::FromStr;

/// A user command with its raw argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Show(String),
    Import(String),
    Place(String),
    Describe(String),
    Unbind(String),
    State,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0} (try `help`)")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Parse `name [args]`. A leading `%` is accepted so lines pasted from a
    /// notebook still work.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim().to_owned()),
            None => (line, String::new()),
        };
        let name = name.strip_prefix('%').unwrap_or(name);

        let cmd = match name {
            "search" | "lookup" => Command::Search(arg),
            "show" | "fetch" => Command::Show(arg),
            "import" | "imply" => Command::Import(arg),
            "place" => Command::Place(arg),
            "describe" | "desc" => Command::Describe(arg),
            "del" | "unbind" => Command::Unbind(arg),
            "state" => Command::State,
            "help" | "?" | "" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(UnknownCommand(other.to_owned())),
        };
        Ok(cmd)
    }
}
