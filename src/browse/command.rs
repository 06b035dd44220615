//! Parsing of the interactive command line.

use crate::catalog::SortOrder;
use crate::error::{FetchDogError, Result};

/// Commands accepted once logged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Help,
    /// Re-render the current view
    Show,
    /// List the breed selector
    Breeds,
    /// Select a breed; `None` clears the filter
    SelectBreed(Option<String>),
    Sort(SortOrder),
    Next,
    Previous,
    ToggleFavorite(String),
    Favorites,
    Match,
    Logout,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  breeds              list breeds
  breed [name]        filter by breed (no name clears the filter)
  sort asc|desc       sort by breed
  next, prev          change page
  fav <id>            add or remove a favorite
  favs                list favorites
  match               generate a match from your favorites
  show                show the current results
  logout              end the session
  quit                exit";

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "help" | "?" => BrowseCommand::Help,
        "show" | "ls" => BrowseCommand::Show,
        "breeds" => BrowseCommand::Breeds,
        "breed" => {
            if rest.is_empty() {
                BrowseCommand::SelectBreed(None)
            } else {
                BrowseCommand::SelectBreed(Some(rest.to_string()))
            }
        }
        "sort" => {
            if rest.is_empty() {
                return Err(FetchDogError::Validation(
                    "usage: sort asc|desc".to_string(),
                ));
            }
            BrowseCommand::Sort(rest.parse()?)
        }
        "next" | "n" => BrowseCommand::Next,
        "prev" | "previous" | "p" => BrowseCommand::Previous,
        "fav" | "favorite" => {
            if rest.is_empty() {
                return Err(FetchDogError::Validation("usage: fav <id>".to_string()));
            }
            BrowseCommand::ToggleFavorite(rest.to_string())
        }
        "favs" | "favorites" => BrowseCommand::Favorites,
        "match" => BrowseCommand::Match,
        "logout" => BrowseCommand::Logout,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => {
            return Err(FetchDogError::Validation(format!(
                "unknown command '{other}'. Type 'help' for a list of commands"
            )));
        }
    };

    Ok(Some(command))
}
