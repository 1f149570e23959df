use log::debug;
use pest::Parser;
use pest_derive::Parser as PestParser;

use crate::{Instruction, Program, SkipReason, SkippedLine, Statement};

#[derive(PestParser)]
#[grammar = "src/grammar.pest"]
struct DslParser;

/// Largest repeat count accepted by a single `forward(N)` line.
pub const MAX_FORWARD_REPEAT: u32 = 10_000;

/// Marker that starts a comment line.
const COMMENT_MARKER: char = '#';

/// Errors that can happen when parsing a single statement.
#[derive(Debug, thiserror::Error)]
pub enum AstError {
    #[error("parse error: {0}")]
    Pest(String),
    #[error("unexpected grammar shape: {0}")]
    Shape(&'static str),
    #[error("forward count '{0}' is larger than {MAX_FORWARD_REPEAT}")]
    CountOutOfRange(String),
}

impl AstError {
    fn skip_reason(&self) -> SkipReason {
        match self {
            AstError::CountOutOfRange(_) => SkipReason::CountOutOfRange,
            AstError::Pest(_) | AstError::Shape(_) => SkipReason::Unrecognized,
        }
    }
}

/// Parse source text into the flat instruction sequence.
///
/// Unrecognized lines are dropped silently; use [`parse_program`] to see them.
pub fn parse(source: &str) -> Vec<Instruction> {
    parse_program(source).instructions
}

/// Parse source text, keeping a record of every line that was dropped.
pub fn parse_program(source: &str) -> Program {
    let mut program = Program::default();
    for (idx, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }
        match parse_statement(trimmed) {
            Ok(stmt) => {
                debug!("line {}: {stmt:?}", idx + 1);
                program.instructions.extend(stmt.expand());
            },
            Err(e) => {
                debug!("line {} skipped ({e}): {trimmed}", idx + 1);
                program.skipped.push(SkippedLine {
                    line: idx + 1,
                    text: trimmed.to_string(),
                    reason: e.skip_reason(),
                });
            },
        }
    }
    debug!(
        "parsed {} instructions, skipped {} lines",
        program.instructions.len(),
        program.skipped.len()
    );
    program
}

/// Parse one already-trimmed line into a [`Statement`].
///
/// # Errors
/// Returns `AstError::Pest` when the line is not one of the three forms and
/// `AstError::CountOutOfRange` when a `forward` count is too large.
pub fn parse_statement(line: &str) -> Result<Statement, AstError> {
    let mut pairs = DslParser::parse(Rule::line, line).map_err(|e| AstError::Pest(e.to_string()))?;
    let line_pair = pairs.next().ok_or(AstError::Shape("expected line"))?;
    let stmt = line_pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::statement)
        .ok_or(AstError::Shape("expected statement"))?;
    let inner = stmt.into_inner().next().ok_or(AstError::Shape("empty statement"))?;
    match inner.as_rule() {
        Rule::forward => {
            let count = inner
                .into_inner()
                .next()
                .ok_or(AstError::Shape("forward count"))?
                .as_str();
            let n: u32 = count
                .parse()
                .map_err(|_| AstError::CountOutOfRange(count.to_string()))?;
            if n > MAX_FORWARD_REPEAT {
                return Err(AstError::CountOutOfRange(count.to_string()));
            }
            Ok(Statement::Forward(n))
        },
        Rule::left => Ok(Statement::Left),
        Rule::right => Ok(Statement::Right),
        _ => Err(AstError::Shape("unknown statement")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    #[test]
    fn forward_expands_to_repeated_moves() {
        assert_eq!(parse("forward(3)"), vec![MoveForward, MoveForward, MoveForward]);
    }

    #[test]
    fn forward_zero_yields_nothing() {
        let program = parse_program("forward(0)");
        assert!(program.instructions.is_empty());
        assert!(program.skipped.is_empty());
    }

    #[test]
    fn turns_parse_to_single_instructions() {
        assert_eq!(parse("left()\nright()"), vec![TurnLeft, TurnRight]);
    }

    #[test]
    fn leading_zeros_are_plain_digits() {
        assert_eq!(parse_statement("forward(007)").unwrap(), Statement::Forward(7));
    }

    #[test]
    fn embedded_whitespace_does_not_match() {
        for line in ["forward( 3 )", "forward (3)", "left( )", "right ()"] {
            assert!(parse_statement(line).is_err(), "{line} should not parse");
        }
    }

    #[test]
    fn trailing_text_does_not_match() {
        assert!(parse_statement("forward(3) # go").is_err());
        assert!(parse_statement("left();").is_err());
    }

    #[test]
    fn negative_and_non_integer_counts_are_unrecognized() {
        let program = parse_program("forward(-2)\nforward(1.5)\nforward(abc)\nforward()");
        assert!(program.instructions.is_empty());
        assert_eq!(program.skipped.len(), 4);
        assert!(program.skipped.iter().all(|s| s.reason == SkipReason::Unrecognized));
    }

    #[test]
    fn huge_counts_are_out_of_range() {
        let program = parse_program("forward(10001)\nforward(99999999999999999999)\nforward(10000)");
        assert_eq!(program.instructions.len(), MAX_FORWARD_REPEAT as usize);
        assert_eq!(program.skipped.len(), 2);
        assert!(program.skipped.iter().all(|s| s.reason == SkipReason::CountOutOfRange));
    }

    #[test]
    fn comments_and_blank_lines_are_not_diagnostics() {
        let program = parse_program("# plan\n\n   \n  # indented comment\nright()");
        assert_eq!(program.instructions, vec![TurnRight]);
        assert!(program.skipped.is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(parse("   forward(2)\t\r\n\tleft()  "), vec![MoveForward, MoveForward, TurnLeft]);
    }
}
