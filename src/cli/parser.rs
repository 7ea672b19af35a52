// Command-line parsing for the conversational interface
//
// Each input line is tried against a fixed, ordered list of patterns; the
// first match decides the command kind, then its arguments are validated.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use crate::cli::command::Command;
use crate::error::{Result, YarrError};
use crate::models::Task;
use crate::utils::parse_date_time;

/// Command kinds in matching priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPattern {
    Exit,
    List,
    Mark,
    Unmark,
    Delete,
    Todo,
    Deadline,
    Event,
    Find,
}

impl CommandPattern {
    pub const PRIORITY: [CommandPattern; 9] = [
        CommandPattern::Exit,
        CommandPattern::List,
        CommandPattern::Mark,
        CommandPattern::Unmark,
        CommandPattern::Delete,
        CommandPattern::Todo,
        CommandPattern::Deadline,
        CommandPattern::Event,
        CommandPattern::Find,
    ];

    fn regex_source(self) -> &'static str {
        match self {
            CommandPattern::Exit => r"^bye$",
            CommandPattern::List => r"^list$",
            CommandPattern::Mark => r"^mark (\S+)$",
            CommandPattern::Unmark => r"^unmark (\S+)$",
            CommandPattern::Delete => r"^delete (\S+)$",
            CommandPattern::Todo => r"^todo\s+(\S.*)$",
            CommandPattern::Deadline => r"^deadline\s+(.+)$",
            CommandPattern::Event => r"^event\s+(.+)$",
            CommandPattern::Find => r"^find(?:\s+(\S+))?\s*$",
        }
    }

    /// Build the command from a successful match
    fn build(self, caps: &Captures<'_>) -> Result<Command> {
        let arg = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        match self {
            CommandPattern::Exit => Ok(Command::Exit),
            CommandPattern::List => Ok(Command::List),
            CommandPattern::Mark => Ok(Command::ToggleMark {
                index: parse_index(arg)?,
                done: true,
            }),
            CommandPattern::Unmark => Ok(Command::ToggleMark {
                index: parse_index(arg)?,
                done: false,
            }),
            CommandPattern::Delete => Ok(Command::Delete { index: parse_index(arg)? }),
            CommandPattern::Todo => Ok(Command::Add(Task::todo(arg.trim()))),
            CommandPattern::Deadline => parse_deadline(arg).map(Command::Add),
            CommandPattern::Event => parse_event(arg).map(Command::Add),
            CommandPattern::Find => {
                if arg.is_empty() {
                    Err(YarrError::MissingKeyword)
                } else {
                    Ok(Command::Find { keyword: arg.to_string() })
                }
            }
        }
    }
}

static PATTERNS: Lazy<Vec<(CommandPattern, Regex)>> = Lazy::new(|| {
    CommandPattern::PRIORITY
        .iter()
        .map(|pattern| {
            let regex = Regex::new(pattern.regex_source()).expect("valid command regex");
            (*pattern, regex)
        })
        .collect()
});

/// Classify one line of input and build the matching command
pub fn parse_command(input: &str) -> Result<Command> {
    for (pattern, regex) in PATTERNS.iter() {
        if let Some(caps) = regex.captures(input) {
            let result = pattern.build(&caps);
            log::debug!("Input {:?} matched {:?}: {:?}", input, pattern, result);
            return result;
        }
    }
    log::debug!("Input {:?} matched no command pattern", input);
    Err(YarrError::UnrecognizedCommand)
}

/// Parse a 1-based task number; range is checked when the command runs
/// Digits only: signs are rejected, and so is anything too large for an `i64`
fn parse_index(token: &str) -> Result<i64> {
    let invalid = || YarrError::InvalidIndexFormat(token.to_string());
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse::<i64>().map_err(|_| invalid())
}

/// `<description> /by <date>`
fn parse_deadline(body: &str) -> Result<Task> {
    let (description, by) = body.split_once("/by").ok_or(YarrError::MalformedDeadline)?;
    let (description, by) = (description.trim(), by.trim());
    if description.is_empty() || by.is_empty() {
        return Err(YarrError::MalformedDeadline);
    }
    Ok(Task::deadline(description, parse_date_time(by)?))
}

/// `<description> /from <date> /to <date>`
fn parse_event(body: &str) -> Result<Task> {
    let (description, times) = body.split_once("/from").ok_or(YarrError::MalformedEvent)?;
    let (from, to) = times.split_once("/to").ok_or(YarrError::MalformedEvent)?;
    let (description, from, to) = (description.trim(), from.trim(), to.trim());
    if description.is_empty() || from.is_empty() || to.is_empty() {
        return Err(YarrError::MalformedEvent);
    }
    let from = parse_date_time(from)?;
    let to = parse_date_time(to)?;
    Task::event(description, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskKind;
    use chrono::NaiveDate;

    fn added(input: &str) -> Task {
        match parse_command(input) {
            Ok(Command::Add(task)) => task,
            other => panic!("expected Add for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_exit_and_list_are_exact() {
        assert!(matches!(parse_command("bye"), Ok(Command::Exit)));
        assert!(matches!(parse_command("list"), Ok(Command::List)));
        assert!(matches!(parse_command("bye now"), Err(YarrError::UnrecognizedCommand)));
        assert!(matches!(parse_command("listing"), Err(YarrError::UnrecognizedCommand)));
        assert!(matches!(parse_command("BYE"), Err(YarrError::UnrecognizedCommand)));
    }

    #[test]
    fn test_indexed_commands() {
        assert!(matches!(
            parse_command("mark 2"),
            Ok(Command::ToggleMark { index: 2, done: true })
        ));
        assert!(matches!(
            parse_command("unmark 1"),
            Ok(Command::ToggleMark { index: 1, done: false })
        ));
        assert!(matches!(parse_command("delete 99"), Ok(Command::Delete { index: 99 })));
        // Range is not checked while parsing
        assert!(matches!(parse_command("delete 0"), Ok(Command::Delete { index: 0 })));
    }

    #[test]
    fn test_invalid_index_format() {
        match parse_command("mark abc") {
            Err(YarrError::InvalidIndexFormat(token)) => assert_eq!(token, "abc"),
            other => panic!("expected InvalidIndexFormat, got {:?}", other),
        }
        assert!(matches!(parse_command("delete 1.5"), Err(YarrError::InvalidIndexFormat(_))));
        assert!(matches!(
            parse_command("unmark 99999999999999999999999"),
            Err(YarrError::InvalidIndexFormat(_))
        ));
    }

    #[test]
    fn test_signed_index_is_invalid() {
        match parse_command("mark +1") {
            Err(YarrError::InvalidIndexFormat(token)) => assert_eq!(token, "+1"),
            other => panic!("expected InvalidIndexFormat, got {:?}", other),
        }
        assert!(matches!(parse_command("unmark +2"), Err(YarrError::InvalidIndexFormat(_))));
        assert!(matches!(parse_command("delete -1"), Err(YarrError::InvalidIndexFormat(_))));
    }

    #[test]
    fn test_indexed_commands_reject_extra_content() {
        assert!(matches!(parse_command("mark 1 2"), Err(YarrError::UnrecognizedCommand)));
        assert!(matches!(parse_command("mark"), Err(YarrError::UnrecognizedCommand)));
    }

    #[test]
    fn test_todo() {
        let task = added("todo read book");
        assert_eq!(task.description, "read book");
        assert_eq!(task.kind, TaskKind::Todo);
        assert!(!task.is_done);

        assert_eq!(added("todo   swab the deck  ").description, "swab the deck");
        assert!(matches!(parse_command("todo"), Err(YarrError::UnrecognizedCommand)));
        assert!(matches!(parse_command("todo    "), Err(YarrError::UnrecognizedCommand)));
    }

    #[test]
    fn test_deadline() {
        let task = added("deadline submit report /by 20/12/2024 1800");
        assert_eq!(task.description, "submit report");
        let by = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap().and_hms_opt(18, 0, 0).unwrap();
        assert_eq!(task.kind, TaskKind::Deadline { by });
    }

    #[test]
    fn test_malformed_deadline() {
        for input in [
            "deadline submit report",
            "deadline submit report /by",
            "deadline /by 20/12/2024 1800",
            "deadline submit report by 20/12/2024 1800",
        ] {
            assert!(
                matches!(parse_command(input), Err(YarrError::MalformedDeadline)),
                "expected MalformedDeadline for {:?}", input
            );
        }
    }

    #[test]
    fn test_deadline_bad_date() {
        assert!(matches!(
            parse_command("deadline submit report /by tomorrow"),
            Err(YarrError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            parse_command("deadline submit report /by 2024-12-20 1800"),
            Err(YarrError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_event() {
        let task = added("event trip /from 01/01/2025 0900 /to 03/01/2025 1700");
        assert_eq!(task.description, "trip");
        match task.kind {
            TaskKind::Event { from, to } => {
                assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap());
                assert_eq!(to, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap().and_hms_opt(17, 0, 0).unwrap());
            }
            other => panic!("expected event, got {:?}", other),
        }
    }

    #[test]
    fn test_event_invalid_range() {
        assert!(matches!(
            parse_command("event trip /from 01/01/2025 0900 /to 01/01/2025 0800"),
            Err(YarrError::InvalidDateRange)
        ));
        assert!(matches!(
            parse_command("event trip /from 01/01/2025 0900 /to 01/01/2025 0900"),
            Err(YarrError::InvalidDateRange)
        ));
    }

    #[test]
    fn test_malformed_event() {
        for input in [
            "event trip",
            "event trip /to 01/01/2025 0900",
            "event trip /from 01/01/2025 0900",
            "event trip /to 01/01/2025 0800 /from 01/01/2025 0900",
            "event /from 01/01/2025 0900 /to 01/01/2025 1000",
        ] {
            assert!(
                matches!(parse_command(input), Err(YarrError::MalformedEvent)),
                "expected MalformedEvent for {:?}", input
            );
        }
    }

    #[test]
    fn test_event_bad_date() {
        assert!(matches!(
            parse_command("event trip /from 1/1/2025 0900 /to 01/01/2025 1000"),
            Err(YarrError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_find() {
        match parse_command("find book") {
            Ok(Command::Find { keyword }) => assert_eq!(keyword, "book"),
            other => panic!("expected Find, got {:?}", other),
        }
        assert!(matches!(parse_command("find"), Err(YarrError::MissingKeyword)));
        assert!(matches!(parse_command("find   "), Err(YarrError::MissingKeyword)));
        assert!(matches!(parse_command("find two words"), Err(YarrError::UnrecognizedCommand)));
    }

    #[test]
    fn test_unrecognized() {
        for input in ["xyz", "", "   ", "Todo read", "remove 1", "findbook"] {
            assert!(
                matches!(parse_command(input), Err(YarrError::UnrecognizedCommand)),
                "expected UnrecognizedCommand for {:?}", input
            );
        }
    }

    #[test]
    fn test_priority_order_is_fixed() {
        assert_eq!(CommandPattern::PRIORITY[0], CommandPattern::Exit);
        assert_eq!(CommandPattern::PRIORITY[8], CommandPattern::Find);
        // A todo whose text mentions /by stays a todo
        let task = added("todo learn the /by flag");
        assert_eq!(task.kind, TaskKind::Todo);
    }
}
