/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text to send as a query
    Ask(String),
    New,
    List,
    Select(String),
    Rename { id: String, title: String },
    Delete(String),
    Pillar(String),
    Show,
    Help,
    Quit,
    /// Slash command that is unknown or missing its argument
    Invalid(String),
}

pub const HELP: &str = "\
/new                  start a new session
/list                 list sessions
/select <id>          switch to a session
/rename <id> <title>  rename a session
/delete <id>          delete a session (asks for confirmation)
/pillar <name>        FAIV, Wisdom, Strategy, Expansion, Future or Integrity
/show                 print the active transcript
/help                 this text
/quit                 leave";

/// Parse a line of input. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Some(Command::Ask(line.trim_end_matches(['\r', '\n']).to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match (name.to_ascii_lowercase().as_str(), args) {
        ("new", _) => Command::New,
        ("list" | "ls", _) => Command::List,
        ("show", _) => Command::Show,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", _) => Command::Quit,
        ("select", id) if !id.is_empty() => Command::Select(id.to_string()),
        ("delete", id) if !id.is_empty() => Command::Delete(id.to_string()),
        ("pillar", pillar) if !pillar.is_empty() => Command::Pillar(pillar.to_string()),
        ("rename", args) => match args.split_once(char::is_whitespace) {
            Some((id, title)) if !title.trim().is_empty() => Command::Rename {
                id: id.to_string(),
                title: title.trim().to_string(),
            },
            _ => Command::Invalid(trimmed.to_string()),
        },
        _ => Command::Invalid(trimmed.to_string()),
    };

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_is_a_query() {
        assert_eq!(
            parse_command("Should we hire?\n"),
            Some(Command::Ask("Should we hire?".to_string()))
        );
        assert_eq!(parse_command("   \n"), None);
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_command("/new"), Some(Command::New));
        assert_eq!(parse_command("/LIST"), Some(Command::List));
        assert_eq!(
            parse_command("/select abc-123"),
            Some(Command::Select("abc-123".to_string()))
        );
        assert_eq!(
            parse_command("/rename abc-123  Hiring plan "),
            Some(Command::Rename {
                id: "abc-123".to_string(),
                title: "Hiring plan".to_string()
            })
        );
        assert_eq!(
            parse_command("/pillar wisdom"),
            Some(Command::Pillar("wisdom".to_string()))
        );
        assert_eq!(parse_command("/quit"), Some(Command::Quit));
    }

    #[test]
    fn test_missing_arguments_are_invalid() {
        assert_eq!(
            parse_command("/select"),
            Some(Command::Invalid("/select".to_string()))
        );
        assert_eq!(
            parse_command("/rename abc"),
            Some(Command::Invalid("/rename abc".to_string()))
        );
        assert_eq!(
            parse_command("/frobnicate"),
            Some(Command::Invalid("/frobnicate".to_string()))
        );
    }
}
