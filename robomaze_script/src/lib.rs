//! robomaze_script: the robot command language.
//!
//! A program is plain text, one statement per line:
//! - `forward(N)` moves the robot `N` cells ahead
//! - `left()` turns 90 degrees counter-clockwise
//! - `right()` turns 90 degrees clockwise
//! - blank lines and lines starting with `#` are ignored
//!
//! Parsing is permissive. A line that matches none of the forms contributes
//! nothing and does not stop the rest of the program from parsing.
//! [`parse_program`] additionally reports those lines as [`SkippedLine`]s so
//! front ends can point them out to the learner.

mod parser;
pub use parser::{AstError, MAX_FORWARD_REPEAT, parse, parse_program, parse_statement};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One primitive robot opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Instruction {
    MoveForward,
    TurnLeft,
    TurnRight,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveForward => write!(f, "forward"),
            Instruction::TurnLeft => write!(f, "left"),
            Instruction::TurnRight => write!(f, "right"),
        }
    }
}

/// A single recognized source line, before expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    /// `forward(N)`
    Forward(u32),
    /// `left()`
    Left,
    /// `right()`
    Right,
}

impl Statement {
    /// Expand the statement into the flat instructions it stands for.
    pub fn expand(self) -> impl Iterator<Item = Instruction> {
        let (instruction, count) = match self {
            Statement::Forward(n) => (Instruction::MoveForward, n as usize),
            Statement::Left => (Instruction::TurnLeft, 1),
            Statement::Right => (Instruction::TurnRight, 1),
        };
        std::iter::repeat_n(instruction, count)
    }
}

/// Why a non-blank, non-comment line produced no instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The line is not `forward(N)`, `left()` or `right()`.
    Unrecognized,
    /// `forward(N)` with `N` above [`MAX_FORWARD_REPEAT`].
    CountOutOfRange,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unrecognized => write!(f, "unrecognized statement"),
            SkipReason::CountOutOfRange => {
                write!(f, "forward count exceeds {MAX_FORWARD_REPEAT}")
            },
        }
    }
}

/// A source line that was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line: usize,
    /// The trimmed line text.
    pub text: String,
    pub reason: SkipReason,
}

/// Parsed program: the flat instruction stream plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub skipped: Vec<SkippedLine>,
}

impl Program {
    /// Number of `MoveForward` instructions in the program.
    pub fn forward_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| **i == Instruction::MoveForward)
            .count()
    }

    /// Number of turn instructions in the program.
    pub fn turn_count(&self) -> usize {
        self.instructions.len() - self.forward_count()
    }
}
