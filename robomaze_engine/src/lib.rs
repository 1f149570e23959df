#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const ROBOMAZE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod data_paths;
pub mod level;
pub mod loader;
pub mod maze;
pub mod playback;
pub mod pose;
pub mod repl;
pub mod session;
pub mod sim;
pub mod style;
pub mod view;

// Re-exports for convenience
pub use level::{Level, builtin_levels};
pub use loader::load_game;
pub use maze::{Maze, MazeError, Position, Tile};
pub use playback::Playback;
pub use pose::{Facing, Pose};
pub use repl::run_repl;
pub use session::Session;
pub use sim::{Outcome, RunStatus, Simulation, run, run_observed};
