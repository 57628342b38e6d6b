//! Slash commands of the interactive surface.
//!
//! A line is a command only when its first token is a known command name.
//! Anything else, including text that merely starts with `/`, is a chat
//! message and goes through the router.

use std::path::PathBuf;

/// A recognised slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    History,
    Timeline,
    /// Survey summary; `None` when no path was given
    Survey(Option<PathBuf>),
    Help,
}

impl Command {
    /// Parse a trimmed input line. Returns `None` for chat messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "/quit" | "/exit" => Some(Command::Quit),
            "/history" => Some(Command::History),
            "/timeline" => Some(Command::Timeline),
            "/survey" => Some(Command::Survey((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            "/help" => Some(Command::Help),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands() {
        assert_eq!(Command::parse("/quit"), Some(Command::Quit));
        assert_eq!(Command::parse("/exit"), Some(Command::Quit));
        assert_eq!(Command::parse("  /history "), Some(Command::History));
        assert_eq!(Command::parse("/timeline"), Some(Command::Timeline));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(
            Command::parse("/survey  data/answers.csv "),
            Some(Command::Survey(Some(PathBuf::from("data/answers.csv"))))
        );
        assert_eq!(Command::parse("/survey"), Some(Command::Survey(None)));
    }

    #[test]
    fn test_slash_text_is_a_message() {
        for line in ["/ i want to give up", "/hello there", "/", "//history", "/History", "hello /quit"] {
            assert_eq!(Command::parse(line), None, "'{}'", line);
        }
    }
}
