//! REPL and command handling.
//!
//! The interactive front end reads commands with `rustyline`, keeps the
//! learner's program in the [`Session`], and animates runs through
//! [`Playback`]. Lines that parse as program statements are appended to the
//! program directly, so short programs can be typed straight at the prompt.
//! Ctrl-C during an animated run abandons the playback, not the session.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use colored::Colorize;
use log::{info, warn};
use robomaze_script::parse_statement;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::command::{Command, parse_command};
use crate::loader::config::EngineConfig;
use crate::playback::Playback;
use crate::pose::Pose;
use crate::session::Session;
use crate::style::GameStyle;
use crate::view::{level_banner, render_maze, skipped_warnings};

const HELP_TEXT: &str = "\
Program statements (one per line):
  forward(N)   move N cells ahead
  left()       turn 90 degrees left
  right()      turn 90 degrees right
  # ...        comment

Commands:
  edit         type a new program, finish with `end`
  program      print the current program
  load FILE    read the program from a file
  run          run the program from the start
  reset        put the robot back at the start
  show         draw the maze
  levels       list levels
  level N      switch to level N
  help         this text
  quit         leave

Any line that is a program statement is appended to the program.";

/// Run the read-eval-print loop until the user quits.
///
/// # Errors
/// - line editor setup or unrecoverable terminal read failures
/// - malformed level data discovered while running a program
pub fn run_repl(session: &mut Session) -> Result<()> {
    let mut editor = DefaultEditor::new().context("while setting up the line editor")?;
    let history = history_path();
    if let Some(path) = &history
        && editor.load_history(path).is_ok()
    {
        info!("history loaded from '{}'", path.display());
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        warn!("Ctrl-C will not interrupt playback: {e}");
    }

    show_handler(session, None);
    println!("Type {} for commands.", "help".code_style());

    loop {
        let prompt = format!(
            "\n[Level {}|Program: {} lines]>> ",
            session.level().id,
            session.source().lines().count()
        )
        .prompt_style()
        .to_string();

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("Command canceled.");
                continue;
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("while reading input"),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        match parse_command(&line) {
            Command::Edit => edit_handler(&mut editor, session)?,
            Command::Help => println!("{HELP_TEXT}"),
            Command::Level(id) => match session.select_level(id) {
                Ok(_) => show_handler(session, None),
                Err(e) => println!("{}", e.to_string().error_style()),
            },
            Command::Levels => levels_handler(session),
            Command::Load(path) => match session.load_source(Path::new(&path)) {
                Ok(()) => program_handler(session),
                Err(e) => println!("{}", format!("{e:#}").error_style()),
            },
            Command::Program => program_handler(session),
            Command::Quit => break,
            Command::Reset => {
                println!("The robot is back at the start.");
                show_handler(session, None);
            },
            Command::Run => run_handler(session, &cancel)?,
            Command::Show => show_handler(session, None),
            Command::Unknown(text) if text.is_empty() => {},
            Command::Unknown(text) => append_or_reject(session, &text),
        }
    }

    if let Some(path) = &history {
        save_history(&mut editor, path);
    }
    println!("Bye.");
    Ok(())
}

/// Draw the current level, with the robot at `pose` or at the start.
pub fn show_handler(session: &Session, pose: Option<&Pose>) {
    let level = session.level();
    let start = level.start_pose();
    let pose = pose.unwrap_or(&start);
    println!("{}", level_banner(level).title_style());
    print!("{}", render_maze(&level.maze, Some(pose)));
    println!(
        "Facing {} | Steps {} | Optimal {}",
        pose.facing,
        pose.total_steps.to_string().stat_style(),
        level.optimal_steps.to_string().stat_style()
    );
}

/// List the loaded levels, marking the current one.
pub fn levels_handler(session: &Session) {
    let current = session.level().id;
    for level in session.levels() {
        let marker = if level.id == current { "*" } else { " " };
        println!("{marker} {}", level_banner(level));
    }
}

/// Print the program text with line numbers.
pub fn program_handler(session: &Session) {
    if session.source().trim().is_empty() {
        println!("{}", "(no program yet; use `edit` or type statements)".warning_style());
        return;
    }
    for (idx, line) in session.source().lines().enumerate() {
        println!("{:>3} {}", idx + 1, line.code_style());
    }
}

/// Replace the program with lines typed until `end`.
fn edit_handler(editor: &mut DefaultEditor, session: &mut Session) -> Result<()> {
    println!("Enter the program. Finish with {} on its own line.", "end".code_style());
    let mut lines = Vec::new();
    loop {
        match editor.readline("... ") {
            Ok(line) if line.trim() == "end" => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) => {
                println!("Edit canceled; program unchanged.");
                return Ok(());
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("while reading program lines"),
        }
    }
    let mut source = lines.join("\n");
    source.push('\n');
    session.set_source(source);
    let program = session.program();
    for warning in skipped_warnings(&program.skipped) {
        println!("{}", warning.warning_style());
    }
    println!("{} instructions.", program.instructions.len());
    Ok(())
}

/// Parse, simulate and report the current program.
fn run_handler(session: &Session, cancel: &Arc<AtomicBool>) -> Result<()> {
    let program = session.program();
    for warning in skipped_warnings(&program.skipped) {
        println!("{}", warning.warning_style());
    }
    if program.instructions.is_empty() {
        println!("{}", "The program has no instructions.".warning_style());
    }

    let animate = session.config().animate;
    let playback = cancellable_playback(session.config(), cancel);
    let mut frames = 0usize;
    let report = session.run(&program, &playback, |pose| {
        frames += 1;
        if animate {
            print!("\x1B[2J\x1B[H");
            show_handler(session, Some(pose));
            let _ = io::stdout().flush();
        }
    })?;

    let Some(report) = report else {
        println!("Playback abandoned.");
        return Ok(());
    };
    // the last frame already shows the final pose
    if !animate || frames == 0 {
        show_handler(session, Some(&report.outcome.final_pose));
    }
    print!("{}", report.render());
    Ok(())
}

/// Playback paced by `config` that stops once `cancel` is set.
///
/// The flag is cleared first, so an interrupt from an earlier run does not
/// carry over.
fn cancellable_playback(config: &EngineConfig, cancel: &Arc<AtomicBool>) -> Playback {
    cancel.store(false, Ordering::Relaxed);
    Playback::new(config.playback_delay()).with_cancel(Arc::clone(cancel))
}

fn append_or_reject(session: &mut Session, text: &str) {
    if parse_statement(text).is_ok() {
        let mut source = session.source().to_string();
        if !source.is_empty() && !source.ends_with('\n') {
            source.push('\n');
        }
        source.push_str(text);
        source.push('\n');
        session.set_source(source);
        println!("Added {}.", text.code_style());
    } else {
        println!("I don't understand {}. Type {} for commands.", text.error_style(), "help".bold());
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("robomaze").join("history.txt"))
}

fn save_history(editor: &mut DefaultEditor, path: &Path) {
    if let Some(dir) = path.parent()
        && let Err(e) = fs::create_dir_all(dir)
    {
        warn!("could not create history directory '{}': {e}", dir.display());
        return;
    }
    if let Err(e) = editor.save_history(path) {
        warn!("could not save history to '{}': {e}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::builtin_levels;
    use crate::loader::GameData;
    use crate::loader::scoring::ScoringConfig;

    fn session() -> Session {
        let config = EngineConfig {
            animate: false,
            ..EngineConfig::default()
        };
        Session::new(GameData {
            config,
            scoring: ScoringConfig::default(),
            levels: builtin_levels(),
        })
        .unwrap()
    }

    #[test]
    fn stale_interrupt_is_cleared_before_a_run() {
        let s = session();
        let cancel = Arc::new(AtomicBool::new(true));
        let playback = cancellable_playback(s.config(), &cancel);
        assert!(!cancel.load(Ordering::Relaxed));
        let report = s.run(&s.program(), &playback, |_| {}).unwrap();
        assert!(report.is_some());
    }

    #[test]
    fn interrupt_during_run_abandons_playback() {
        let mut s = session();
        s.set_source("forward(12)\nright()\nforward(12)");
        let cancel = Arc::new(AtomicBool::new(false));
        let playback = cancellable_playback(s.config(), &cancel);
        let mut frames = 0;
        let report = s
            .run(&s.program(), &playback, |_| {
                frames += 1;
                if frames == 3 {
                    cancel.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();
        assert_eq!(report, None);
        assert_eq!(frames, 3);
    }

    #[test]
    fn statements_typed_at_the_prompt_are_appended() {
        let mut s = session();
        append_or_reject(&mut s, "forward(2)");
        append_or_reject(&mut s, "jump()");
        append_or_reject(&mut s, "left()");
        assert_eq!(s.source(), "forward(2)\nleft()\n");
    }
}
