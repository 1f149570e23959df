#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Robomaze **
//! Program a robot through a grid maze from the terminal.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::info;

use robomaze_engine::repl::show_handler;
use robomaze_engine::style::GameStyle;
use robomaze_engine::view::skipped_warnings;
use robomaze_engine::{Playback, ROBOMAZE_VERSION, Session, load_game, run_repl};

#[derive(Parser, Debug)]
#[command(name = "robomaze", version, about = "Guide a robot through a maze with forward/left/right programs")]
struct Cli {
    /// Level id to start on
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// RON level pack to load instead of the default levels
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Run this program file once and exit
    #[arg(long)]
    program: Option<PathBuf>,
    /// Step limit for levels that do not set their own
    #[arg(long)]
    step_limit: Option<u32>,
    /// Skip frame-by-frame animation
    #[arg(long)]
    no_animate: bool,
    /// With --program, print the result as JSON
    #[arg(long, requires = "program")]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    info!("Start: loading Robomaze {ROBOMAZE_VERSION} data...");
    let mut data = load_game(cli.levels.as_deref()).context("while loading game data")?;
    if let Some(limit) = cli.step_limit {
        data.config.step_limit = limit;
    }
    if cli.no_animate || cli.program.is_some() {
        data.config.animate = false;
    }
    let mut session = Session::new(data)?;
    session.select_level(cli.level)?;

    if let Some(path) = &cli.program {
        return run_once(&mut session, path, cli.json);
    }

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("while clearing the screen")?;
    info!("Starting the REPL");
    println!("{:^60}", "ROBOMAZE".bright_yellow().underline());
    run_repl(&mut session)
}

fn run_once(session: &mut Session, path: &Path, json: bool) -> Result<()> {
    let source = fs::read_to_string(path).with_context(|| format!("reading program from '{}'", path.display()))?;
    session.set_source(source);
    let program = session.program();
    for warning in skipped_warnings(&program.skipped) {
        eprintln!("{}", warning.warning_style());
    }

    let report = session
        .run(&program, &Playback::instant(), |_| {})?
        .context("run was cancelled")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        show_handler(session, Some(&report.outcome.final_pose));
        print!("{}", report.render());
    }
    Ok(())
}
