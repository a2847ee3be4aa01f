//! Line commands for the terminal driver.
//!
//! One command per input line. Arguments are taken verbatim after the
//! first space so search text reaches the controller unmodified.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::domain::ViewSnapshot;

/// Help text printed by `help`.
pub const HELP: &str = "\
commands:
  name <text>         set the dish name search (empty clears it)
  ingredients <text>  set the ingredient search, space separated
  next | prev         move between pages
  pick <n>            accept suggestion number n
  refresh             reload the current page
  show                print the current page again
  quit                exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the name search text.
    Name(String),
    /// Replace the ingredient search text.
    Ingredients(String),
    /// Next page.
    Next,
    /// Previous page.
    Previous,
    /// Accept the suggestion at this 1-based position.
    Pick(usize),
    /// Reload the current page.
    Refresh,
    /// Print the current page.
    Show,
    /// Print [`HELP`].
    Help,
    /// Exit the driver.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The line was blank.
    #[error("empty command")]
    Empty,
    /// The verb is not known.
    #[error("unknown command: {0}")]
    Unknown(String),
    /// `pick` needs a positive number.
    #[error("pick expects a suggestion number starting at 1, got {0:?}")]
    BadIndex(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        match verb {
            "" => Err(CommandError::Empty),
            "name" | "n" => Ok(Self::Name(rest.to_string())),
            "ingredients" | "i" => Ok(Self::Ingredients(rest.to_string())),
            "next" => Ok(Self::Next),
            "prev" | "previous" => Ok(Self::Previous),
            "pick" => match rest.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Self::Pick(n)),
                _ => Err(CommandError::BadIndex(rest.trim().to_string())),
            },
            "refresh" => Ok(Self::Refresh),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Formats the listing and pagination line of a snapshot.
#[must_use]
pub fn render_page(snapshot: &ViewSnapshot) -> String {
    let state = &snapshot.state;
    let mut out = String::new();
    if state.loading {
        out.push_str("Loading dishes...\n");
        return out;
    }
    if let Some(err) = &state.last_error {
        let _ = writeln!(out, "! {err}");
    }
    for dish in &state.results.dishes {
        let prep = dish
            .prep_minutes()
            .map_or_else(|| "?".to_string(), |m| m.to_string());
        let _ = writeln!(
            out,
            "- {} [{}] {} mins: {}",
            dish.name,
            dish.diet,
            prep,
            dish.ingredient_line()
        );
    }
    let _ = writeln!(
        out,
        "{}Page {} of {}{}",
        if snapshot.has_previous { "< " } else { "  " },
        state.page,
        snapshot.total_pages,
        if snapshot.has_next { " >" } else { "" }
    );
    out
}

/// Formats a numbered suggestion list for `pick`.
#[must_use]
pub fn render_suggestions(suggestions: &[String]) -> String {
    let mut out = String::new();
    for (i, suggestion) in suggestions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {suggestion}", i.saturating_add(1));
    }
    out
}
