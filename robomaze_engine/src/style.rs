//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn wall_style(&self) -> ColoredString;
    fn floor_style(&self) -> ColoredString;
    fn goal_style(&self) -> ColoredString;
    fn robot_style(&self) -> ColoredString;
    fn title_style(&self) -> ColoredString;
    fn log_style(&self) -> ColoredString;
    fn success_style(&self) -> ColoredString;
    fn failure_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn warning_style(&self) -> ColoredString;
    fn stat_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn code_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn wall_style(&self) -> ColoredString {
        self.truecolor(120, 120, 130)
    }
    fn floor_style(&self) -> ColoredString {
        self.dimmed().truecolor(75, 80, 75)
    }
    fn goal_style(&self) -> ColoredString {
        self.bold().truecolor(230, 30, 30)
    }
    fn robot_style(&self) -> ColoredString {
        self.bold().truecolor(220, 180, 40)
    }
    fn title_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).underline()
    }
    fn log_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn success_style(&self) -> ColoredString {
        self.bold().truecolor(110, 220, 110)
    }
    fn failure_style(&self) -> ColoredString {
        self.bold().truecolor(230, 80, 80)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn warning_style(&self) -> ColoredString {
        self.italic().truecolor(230, 230, 30)
    }
    fn stat_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60)
    }
    fn code_style(&self) -> ColoredString {
        self.truecolor(150, 230, 30)
    }
}

impl GameStyle for String {
    fn wall_style(&self) -> ColoredString {
        self.as_str().wall_style()
    }
    fn floor_style(&self) -> ColoredString {
        self.as_str().floor_style()
    }
    fn goal_style(&self) -> ColoredString {
        self.as_str().goal_style()
    }
    fn robot_style(&self) -> ColoredString {
        self.as_str().robot_style()
    }
    fn title_style(&self) -> ColoredString {
        self.as_str().title_style()
    }
    fn log_style(&self) -> ColoredString {
        self.as_str().log_style()
    }
    fn success_style(&self) -> ColoredString {
        self.as_str().success_style()
    }
    fn failure_style(&self) -> ColoredString {
        self.as_str().failure_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn warning_style(&self) -> ColoredString {
        self.as_str().warning_style()
    }
    fn stat_style(&self) -> ColoredString {
        self.as_str().stat_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn code_style(&self) -> ColoredString {
        self.as_str().code_style()
    }
}
