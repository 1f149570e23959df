use robomaze_script::{Instruction, SkipReason, parse, parse_program};

use Instruction::{MoveForward, TurnLeft, TurnRight};

#[test]
fn forward_lines_sum_in_source_order() {
    let src = "forward(2)\nforward(5)\nforward(1)";
    let instructions = parse(src);
    assert_eq!(instructions.len(), 8);
    assert!(instructions.iter().all(|i| *i == MoveForward));
}

#[test]
fn mixed_program_keeps_line_order() {
    let src = r"# Goal: reach the target
forward(2)
left()
forward(1)
right()
";
    assert_eq!(
        parse(src),
        vec![MoveForward, MoveForward, TurnLeft, MoveForward, TurnRight]
    );
}

#[test]
fn unrecognized_lines_never_halt_parsing() {
    let src = "forward(abc)\njump()\nmove the robot please\nforward(2)\nLEFT()\nright()";
    let program = parse_program(src);
    assert_eq!(program.instructions, vec![MoveForward, MoveForward, TurnRight]);

    let lines: Vec<usize> = program.skipped.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 5]);
    assert!(program.skipped.iter().all(|s| s.reason == SkipReason::Unrecognized));
    assert_eq!(program.skipped[1].text, "jump()");
}

#[test]
fn silent_and_diagnostic_parses_agree() {
    let src = "forward(3)\nnonsense\nleft()\nforward(-1)\nright()\nforward(0)";
    assert_eq!(parse(src), parse_program(src).instructions);
}

#[test]
fn parsing_is_repeatable() {
    let src = "forward(4)\nright()\nforward(12)\nleft()";
    assert_eq!(parse(src), parse(src));
}

#[test]
fn empty_program_has_no_instructions() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n# only comments\n").is_empty());
}

#[test]
fn counts_report_forward_and_turns() {
    let program = parse_program("forward(3)\nleft()\nleft()\nright()");
    assert_eq!(program.forward_count(), 3);
    assert_eq!(program.turn_count(), 3);
}

#[test]
fn end_to_end_program_expands_to_twenty_five() {
    let program = parse_program("forward(12)\nright()\nforward(12)");
    assert_eq!(program.instructions.len(), 25);
    assert_eq!(program.instructions[12], TurnRight);
}
