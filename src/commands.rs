// ABOUTME: Ex-command parsing for the session commands.
// ABOUTME: Accepts vim-style abbreviations such as :mks and :so and a trailing bang.

use thiserror::Error;

/// Command parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
}

/// A session ex-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save the current layout, overwriting without asking when forced.
    MkSession { name: Option<String>, force: bool },
    /// Restore a layout by name or path.
    Source { name: Option<String> },
    /// Restore a layout chosen from the storage directory.
    SourceList,
    /// Delete a session chosen from the storage directory.
    DelSession,
    /// Rename a session chosen from the storage directory.
    RenameSession,
}

/// Full command name and the shortest accepted abbreviation.
const COMMANDS: &[(&str, usize)] = &[
    ("mksession", 3),
    ("source", 2),
    ("sourcelist", 10),
    ("delsession", 10),
    ("renamesession", 13),
];

/// Command parser
pub struct CommandParser;

impl CommandParser {
    /// Parse a command line, with or without the leading ':'
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let trimmed = line.trim();
        let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim_start();
        if trimmed.is_empty() {
            return Err(CommandError::InvalidSyntax("Empty command".to_string()));
        }

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };
        let (word, bang) = match word.strip_suffix('!') {
            Some(word) => (word, true),
            None => (word, false),
        };
        let arg = session_name(Some(rest.to_string()));

        let name = expand(word).ok_or_else(|| CommandError::UnknownCommand(word.to_string()))?;
        if bang && name != "mksession" {
            return Err(CommandError::InvalidSyntax(format!("{name} does not accept !")));
        }

        match name {
            "mksession" => Ok(Command::MkSession { name: arg, force: bang }),
            "source" => Ok(Command::Source { name: arg }),
            _ => {
                if arg.is_some() {
                    return Err(CommandError::InvalidSyntax(format!(
                        "{name} takes no arguments"
                    )));
                }
                Ok(match name {
                    "sourcelist" => Command::SourceList,
                    "delsession" => Command::DelSession,
                    _ => Command::RenameSession,
                })
            }
        }
    }
}

/// Normalize a session name argument: blank means no name was given.
pub fn session_name(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Expand a possibly abbreviated command word to its full name.
fn expand(word: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(full, min)| word.len() >= *min && full.starts_with(word))
        .map(|(full, _)| *full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mksession() {
        let expected = Command::MkSession {
            name: None,
            force: false,
        };
        assert_eq!(CommandParser::parse("mksession"), Ok(expected.clone()));
        assert_eq!(CommandParser::parse(":mks"), Ok(expected.clone()));
        assert_eq!(CommandParser::parse("  :mkses  "), Ok(expected));
    }

    #[test]
    fn test_parse_mksession_with_name_and_bang() {
        assert_eq!(
            CommandParser::parse(":mksession! work"),
            Ok(Command::MkSession {
                name: Some("work".to_string()),
                force: true
            })
        );
        assert_eq!(
            CommandParser::parse("mks   my layout "),
            Ok(Command::MkSession {
                name: Some("my layout".to_string()),
                force: false
            })
        );
    }

    #[test]
    fn test_parse_source() {
        assert_eq!(CommandParser::parse("so"), Ok(Command::Source { name: None }));
        assert_eq!(
            CommandParser::parse(":source /tmp/layout"),
            Ok(Command::Source {
                name: Some("/tmp/layout".to_string())
            })
        );
        assert_eq!(CommandParser::parse("sou"), Ok(Command::Source { name: None }));
    }

    #[test]
    fn test_parse_list_commands() {
        assert_eq!(CommandParser::parse("sourcelist"), Ok(Command::SourceList));
        assert_eq!(CommandParser::parse(":delsession"), Ok(Command::DelSession));
        assert_eq!(CommandParser::parse("renamesession"), Ok(Command::RenameSession));
    }

    #[test]
    fn test_parse_rejects_arguments_on_list_commands() {
        assert_eq!(
            CommandParser::parse("delsession work"),
            Err(CommandError::InvalidSyntax(
                "delsession takes no arguments".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_rejects_bang_outside_mksession() {
        assert_eq!(
            CommandParser::parse("source! work"),
            Err(CommandError::InvalidSyntax(
                "source does not accept !".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_too_short_abbreviation() {
        assert_eq!(
            CommandParser::parse("mk"),
            Err(CommandError::UnknownCommand("mk".to_string()))
        );
        assert_eq!(
            CommandParser::parse("s"),
            Err(CommandError::UnknownCommand("s".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_command() {
        assert_eq!(
            CommandParser::parse(":"),
            Err(CommandError::InvalidSyntax("Empty command".to_string()))
        );
    }

    #[test]
    fn test_blank_session_name_is_no_name() {
        assert_eq!(session_name(Some(String::new())), None);
        assert_eq!(session_name(Some("   ".to_string())), None);
        assert_eq!(session_name(None), None);
        assert_eq!(session_name(Some(" work ".to_string())), Some("work".to_string()));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            CommandParser::parse("wq"),
            Err(CommandError::UnknownCommand("wq".to_string()))
        );
    }
}
