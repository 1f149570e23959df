//! CLI entry point for robomaze_script.
//! Usage: cargo run -p robomaze_script -- check programs/level1.robo

use std::{env, fs, process};

use robomaze_script::{Program, parse_program};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Accept either:
    // 1) cargo run: <bin> -- <cmd> <args>
    // 2) direct:    <bin> <cmd> <args>
    let rest: Vec<String> = match args.as_slice() {
        [_, flag, cmd, tail @ ..] if flag == "--" && (cmd == "check" || cmd == "expand") => {
            let mut v = vec![cmd.clone()];
            v.extend_from_slice(tail);
            v
        },
        [_, cmd, tail @ ..] if cmd == "check" || cmd == "expand" => {
            let mut v = vec![cmd.clone()];
            v.extend_from_slice(tail);
            v
        },
        _ => {
            eprintln!(
                "Usage:\n  robomaze_script check <file> [--deny-skipped]\n  robomaze_script expand <file>"
            );
            process::exit(2);
        },
    };
    let cmd = &rest[0];
    if cmd == "check" {
        run_check(&rest[1..]);
    } else {
        run_expand(&rest[1..]);
    }
}

fn load_program(path: Option<&String>, usage: &str) -> Program {
    let Some(path) = path else {
        eprintln!("{usage}");
        process::exit(2);
    };
    let src = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: unable to read '{path}': {e}");
        process::exit(1);
    });
    parse_program(&src)
}

fn run_check(args: &[String]) {
    let mut path: Option<&String> = None;
    let mut deny_skipped = false;
    for arg in args {
        if arg == "--deny-skipped" {
            deny_skipped = true;
        } else if path.is_none() {
            path = Some(arg);
        }
    }
    let program = load_program(path, "Usage: robomaze_script check <file> [--deny-skipped]");
    for skipped in &program.skipped {
        eprintln!(
            "warning: line {} ignored ({}): {}",
            skipped.line, skipped.reason, skipped.text
        );
    }
    println!(
        "{} instructions ({} forward, {} turns)",
        program.instructions.len(),
        program.forward_count(),
        program.turn_count()
    );
    if deny_skipped && !program.skipped.is_empty() {
        process::exit(1);
    }
}

fn run_expand(args: &[String]) {
    let program = load_program(args.first(), "Usage: robomaze_script expand <file>");
    for instruction in &program.instructions {
        println!("{instruction}");
    }
}
