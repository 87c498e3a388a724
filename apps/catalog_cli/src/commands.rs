//! Line commands typed at the prompt, and how they map onto catalog intents.

use std::collections::BTreeSet;

use catalog_view::{capitalize, format::CATEGORY_NAMES};
use controller::Catalog;
use shared::domain::{PageSize, SortKey, ViewMode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Categories(BTreeSet<String>),
    ToggleCategory(String),
    Sort(SortKey),
    /// 1-based, as shown in the footer.
    Page(usize),
    Next,
    Previous,
    Size(PageSize),
    View(ViewMode),
    Show(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("{0}")]
    InvalidArgument(String),
}

const HELP: &str = "\
commands:
  search <term>       filter by name, type or id (empty clears)
  types <a,b,...>     keep rows with any of these types (empty clears)
  toggle <type>       add or remove one type filter
  sort <key>          sort by key; repeat to flip direction
  page <n> | next | prev
  size <10|25|50>
  view <table|grid>
  show <id|name>      detail view
  help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "types" | "t" => rest
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(category_name)
                .collect::<Result<BTreeSet<_>, _>>()
                .map(Command::Categories),
            "toggle" => category_name(required(rest, "toggle")?).map(Command::ToggleCategory),
            "sort" => required(rest, "sort")?
                .parse()
                .map(Command::Sort)
                .map_err(CommandError::InvalidArgument),
            "page" | "p" => match required(rest, "page")?.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Command::Page(n)),
                _ => Err(CommandError::InvalidArgument(format!(
                    "page must be a positive number (got '{rest}')"
                ))),
            },
            "next" | "n" => Ok(Command::Next),
            "prev" | "previous" => Ok(Command::Previous),
            "size" => required(rest, "size")?
                .parse::<usize>()
                .map_err(|_| format!("page size must be one of 10, 25, 50 (got {rest})"))
                .and_then(PageSize::try_from)
                .map(Command::Size)
                .map_err(CommandError::InvalidArgument),
            "view" => required(rest, "view")?
                .parse()
                .map(Command::View)
                .map_err(CommandError::InvalidArgument),
            "show" => Ok(Command::Show(required(rest, "show")?.to_ascii_lowercase())),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }

    /// Applies a view intent. Returns whether the visible page changed;
    /// `Show`, `Help` and `Quit` are handled by the caller.
    pub fn apply(&self, catalog: &mut Catalog) -> bool {
        match self {
            Command::Search(term) => catalog.search(term.clone()),
            Command::Categories(categories) => catalog.set_categories(categories.clone()),
            Command::ToggleCategory(category) => catalog.toggle_category(category),
            Command::Sort(key) => catalog.sort(*key),
            Command::Page(n) => catalog.go_to_page(n.saturating_sub(1)),
            Command::Next => catalog.next_page(),
            Command::Previous => catalog.previous_page(),
            Command::Size(size) => catalog.set_page_size(*size),
            Command::View(mode) => catalog.set_view_mode(*mode),
            Command::Show(_) | Command::Help | Command::Quit => false,
        }
    }
}

/// Help text followed by the selectable types.
pub fn help_text() -> String {
    format!("{HELP}\ntypes: {}", CATEGORY_NAMES.join(", "))
}

fn category_name(raw: &str) -> Result<String, CommandError> {
    let name = capitalize(&raw.to_ascii_lowercase());
    if CATEGORY_NAMES.contains(&name.as_str()) {
        Ok(name)
    } else {
        Err(CommandError::InvalidArgument(format!(
            "unknown type '{raw}' (one of {})",
            CATEGORY_NAMES.join(", ")
        )))
    }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
