//! Console command grammar.

use roster_core::{AppError, AppResult};
use roster_domain::{FieldUpdate, UserId};

/// Record addressed by a command: an id or `#n` for the n-th visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRef {
    Id(UserId),
    Position(usize),
}

impl RowRef {
    fn parse(token: &str) -> AppResult<Self> {
        match token.strip_prefix('#') {
            Some(position) => {
                let position = position.parse::<usize>().map_err(|error| {
                    AppError::Validation(format!("invalid row number '{token}': {error}"))
                })?;
                if position == 0 {
                    return Err(AppError::Validation("row numbers start at 1".to_owned()));
                }
                Ok(Self::Position(position))
            }
            None => Ok(Self::Id(UserId::new(token)?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Search(String),
    Show(RowRef),
    Edit(RowRef),
    Set(FieldUpdate),
    Save,
    Cancel,
    Delete(RowRef),
    Reload,
    Dashboard,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "search" | "find" => Self::Search(rest.to_owned()),
            "show" | "details" => Self::Show(RowRef::parse(required(verb, rest)?)?),
            "edit" => Self::Edit(RowRef::parse(required(verb, rest)?)?),
            "set" => {
                let (field, value) = required(verb, rest)?
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, value)| (field, value.trim()));
                Self::Set(FieldUpdate::parse(field, value)?)
            }
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "delete" | "rm" => Self::Delete(RowRef::parse(required(verb, rest)?)?),
            "reload" => Self::Reload,
            "dashboard" => Self::Dashboard,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(AppError::Validation(format!(
                    "unknown command '{other}', type 'help' for the list"
                )));
            }
        };

        Ok(Some(command))
    }
}

fn required<'a>(verb: &str, rest: &'a str) -> AppResult<&'a str> {
    if rest.is_empty() {
        return Err(AppError::Validation(format!("'{verb}' needs an argument")));
    }

    Ok(rest)
}
