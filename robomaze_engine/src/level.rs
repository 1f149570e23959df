//! module: level
//!
//! A level bundles a maze with its start pose, goal and reference step count.
//! Levels come either from [`builtin_levels`] or from a RON level pack (see
//! [`crate::loader::levels`]).

use robomaze_script::Instruction;

use crate::maze::{Maze, MazeError, Position, Tile};
use crate::pose::{Facing, Pose};
use crate::sim::{Outcome, Simulation};

/// Side length of the stock levels.
pub const STOCK_SIZE: usize = 15;

/// A playable maze level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub id: u32,
    pub name: String,
    /// Concept the level is themed around (display only).
    pub algorithm: String,
    pub maze: Maze,
    pub start: Position,
    pub facing: Facing,
    pub goal: Position,
    /// Reference step count used for rating a successful run.
    pub optimal_steps: u32,
    /// Per-level override of the configured step limit.
    pub step_limit: Option<u32>,
}

impl Level {
    /// Fresh starting pose; every run gets its own.
    pub fn start_pose(&self) -> Pose {
        Pose::new(self.start, self.facing)
    }

    /// The level's own step limit, or `default` if it has none.
    pub fn effective_step_limit(&self, default: u32) -> u32 {
        self.step_limit.unwrap_or(default)
    }

    /// Set up a simulation of `instructions` on this level.
    ///
    /// # Errors
    /// Fails if the level's start or goal is not an open cell.
    pub fn simulation<'a>(
        &'a self,
        instructions: &'a [Instruction],
        default_limit: u32,
    ) -> Result<Simulation<'a>, MazeError> {
        Simulation::new(
            instructions,
            &self.maze,
            self.start_pose(),
            self.goal,
            self.effective_step_limit(default_limit),
        )
    }

    /// Simulate `instructions` to completion.
    ///
    /// # Errors
    /// Fails if the level's start or goal is not an open cell.
    pub fn run(&self, instructions: &[Instruction], default_limit: u32) -> Result<Outcome, MazeError> {
        Ok(self.simulation(instructions, default_limit)?.run())
    }
}

/// The four stock 15x15 levels.
pub fn builtin_levels() -> Vec<Level> {
    vec![
        stock_level(1, "Basic Commands", "Manual Control", &basic_walls(), 28),
        stock_level(2, "Dijkstra's Algorithm", "Dijkstra", &lattice_walls(), 26),
        stock_level(3, "A* Search", "A*", &SEGMENT_WALLS, 30),
        stock_level(4, "Minimum Spanning Tree", "MST", &SEGMENT_WALLS, 30),
    ]
}

const STOCK_START: Position = Position::new(1, 1);
const STOCK_GOAL: Position = Position::new(13, 13);

/// Scattered wall segments shared by the later levels.
const SEGMENT_WALLS: [(usize, usize); 22] = [
    (3, 3),
    (3, 4),
    (3, 5),
    (3, 9),
    (3, 10),
    (3, 11),
    (5, 7),
    (6, 7),
    (7, 7),
    (8, 7),
    (9, 7),
    (7, 3),
    (7, 4),
    (7, 5),
    (7, 9),
    (7, 10),
    (7, 11),
    (11, 5),
    (11, 6),
    (11, 7),
    (11, 8),
    (11, 9),
];

/// An L-shaped corridor: a column, a row and a short column of walls.
fn basic_walls() -> Vec<(usize, usize)> {
    let mut walls: Vec<_> = (2..8).map(|row| (row, 5)).collect();
    walls.extend((6..13).map(|col| (8, col)));
    walls.extend((9..13).map(|row| (row, 10)));
    walls
}

/// Single wall blocks on every third row and column.
fn lattice_walls() -> Vec<(usize, usize)> {
    (2..13)
        .step_by(3)
        .flat_map(|row| (2..13).step_by(3).map(move |col| (row, col)))
        .collect()
}

fn stock_level(id: u32, name: &str, algorithm: &str, walls: &[(usize, usize)], optimal_steps: u32) -> Level {
    let mut maze = Maze::bordered(STOCK_SIZE, STOCK_SIZE);
    let walls = walls
        .iter()
        .map(|&(row, col)| Position::new(row, col))
        .filter(|&pos| pos != STOCK_START && pos != STOCK_GOAL);
    maze.fill_interior(walls, Tile::Wall);
    maze.fill_interior([STOCK_GOAL], Tile::Goal);
    Level {
        id,
        name: name.to_string(),
        algorithm: algorithm.to_string(),
        maze,
        start: STOCK_START,
        facing: Facing::East,
        goal: STOCK_GOAL,
        optimal_steps,
        step_limit: None,
    }
}
