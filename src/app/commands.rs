//! Parsing of interactive session commands.
//!
//! Any input that is not a recognized command is treated as a new search
//! query, matching how a search box behaves.

use thiserror::Error;

/// One parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new search with the given query.
    Search(String),
    /// Fetch the next page of results.
    LoadMore,
    /// Download the numbered result (1-based).
    Download(usize),
    /// Show the interactive help text.
    Help,
    /// End the session.
    Quit,
}

/// Input that could not be interpreted as a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The input line was empty.
    #[error("type a query to search, or `h` for help")]
    Empty,

    /// A download command without a result number.
    #[error("`{0}` needs a result number, e.g. `d 3`")]
    MissingIndex(String),

    /// A download command with a non-numeric or zero result number.
    #[error("`{0}` is not a valid result number")]
    InvalidIndex(String),
}

/// Parses one line of interactive input.
///
/// # Errors
///
/// Returns [`CommandError`] for empty input or a malformed download
/// command.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(CommandError::Empty);
    }

    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match head {
        "q" | "quit" | "exit" if rest.is_empty() => Ok(Command::Quit),
        "m" | "more" if rest.is_empty() => Ok(Command::LoadMore),
        "h" | "help" | "?" if rest.is_empty() => Ok(Command::Help),
        "d" | "download" => match rest.as_slice() {
            [] => Err(CommandError::MissingIndex(head.to_string())),
            [value] => value
                .parse::<usize>()
                .ok()
                .filter(|index| *index >= 1)
                .map(Command::Download)
                .ok_or_else(|| CommandError::InvalidIndex((*value).to_string())),
            _ => Err(CommandError::InvalidIndex(rest.join(" "))),
        },
        _ => Ok(Command::Search(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_aliases() {
        for input in ["q", "quit", "exit", "  q  "] {
            assert_eq!(parse_command(input), Ok(Command::Quit), "input: {input}");
        }
    }

    #[test]
    fn test_parse_load_more_aliases() {
        assert_eq!(parse_command("m"), Ok(Command::LoadMore));
        assert_eq!(parse_command("more"), Ok(Command::LoadMore));
    }

    #[test]
    fn test_parse_help_aliases() {
        assert_eq!(parse_command("h"), Ok(Command::Help));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("?"), Ok(Command::Help));
    }

    #[test]
    fn test_parse_download_with_index() {
        assert_eq!(parse_command("d 3"), Ok(Command::Download(3)));
        assert_eq!(parse_command("download 12"), Ok(Command::Download(12)));
    }

    #[test]
    fn test_parse_download_missing_index() {
        assert_eq!(
            parse_command("d"),
            Err(CommandError::MissingIndex("d".to_string()))
        );
    }

    #[test]
    fn test_parse_download_invalid_index() {
        assert_eq!(
            parse_command("d zero"),
            Err(CommandError::InvalidIndex("zero".to_string()))
        );
        assert_eq!(
            parse_command("d 0"),
            Err(CommandError::InvalidIndex("0".to_string()))
        );
        assert_eq!(
            parse_command("d 1 2"),
            Err(CommandError::InvalidIndex("1 2".to_string()))
        );
    }

    #[test]
    fn test_parse_free_text_is_a_search() {
        assert_eq!(
            parse_command("mountain lakes at dawn"),
            Ok(Command::Search("mountain lakes at dawn".to_string()))
        );
        // A command word followed by extra words reads as a query.
        assert_eq!(
            parse_command("more cats please"),
            Ok(Command::Search("more cats please".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
    }
}
