//! Command module
//!
//! Describes the REPL commands. Program text itself is entered with `edit`
//! or loaded from a file; these commands only drive the session.
use variantly;

/// Commands that can be entered at the REPL prompt.
#[derive(Debug, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    /// Enter program lines until `end`.
    Edit,
    Help,
    Level(u32),
    Levels,
    Load(String),
    /// Print the current program text.
    Program,
    Quit,
    /// Redraw the current level at its start pose.
    Reset,
    Run,
    Show,
    Unknown(String),
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let words: Vec<&str> = input.split_whitespace().collect();
    match words.as_slice() {
        ["edit" | "write" | "code"] => Command::Edit,
        ["help" | "?"] => Command::Help,
        ["level" | "lvl", id] => id
            .parse()
            .map_or_else(|_| Command::Unknown(input.trim().to_string()), Command::Level),
        ["levels"] => Command::Levels,
        ["load", path] => Command::Load((*path).to_string()),
        ["program" | "list" | "cat"] => Command::Program,
        ["quit" | "exit" | "q"] => Command::Quit,
        ["reset"] => Command::Reset,
        ["run" | "go"] => Command::Run,
        ["show" | "map" | "look"] => Command::Show,
        _ => Command::Unknown(input.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("run"), Command::Run);
        assert_eq!(parse_command("  map \n"), Command::Show);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert!(parse_command("levels").is_levels());
    }

    #[test]
    fn parses_level_id() {
        assert_eq!(parse_command("level 3"), Command::Level(3));
        assert_eq!(parse_command("level three"), Command::Unknown("level three".into()));
    }

    #[test]
    fn parses_load_path() {
        assert_eq!(parse_command("load programs/level1.robo"), Command::Load("programs/level1.robo".into()));
    }

    #[test]
    fn program_lines_are_not_commands() {
        assert_eq!(parse_command("forward(3)"), Command::Unknown("forward(3)".into()));
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
    }
}
