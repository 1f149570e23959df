use serde::{Deserialize, Serialize};

/// Map character for an impassable cell.
pub const WALL_CHAR: char = '#';
/// Map character for an open cell.
pub const EMPTY_CHAR: char = '.';
/// Map character for the single goal cell.
pub const GOAL_CHAR: char = 'G';

/// A collection of levels loaded together from one file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LevelPackDef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub levels: Vec<LevelDef>,
}

/// A single maze level as authored on disk.
///
/// The grid is given as one string per row using `#`, `.` and `G`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub algorithm: String,
    pub rows: Vec<String>,
    pub start: PositionDef,
    #[serde(default)]
    pub facing: FacingDef,
    pub optimal_steps: u32,
    #[serde(default)]
    pub step_limit: Option<u32>,
}

impl LevelDef {
    /// Number of rows in the authored grid.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row (ragged maps are reported by validation).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.chars().count())
    }

    /// Positions of every goal character in the grid, in row-major order.
    pub fn goal_positions(&self) -> Vec<PositionDef> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|(_, ch)| *ch == GOAL_CHAR)
                    .map(move |(col, _)| PositionDef { row, col })
            })
            .collect()
    }

    /// Character at the given cell, if the cell exists.
    pub fn char_at(&self, pos: PositionDef) -> Option<char> {
        self.rows.get(pos.row).and_then(|line| line.chars().nth(pos.col))
    }
}

/// Grid coordinate in a level definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDef {
    pub row: usize,
    pub col: usize,
}

/// Initial facing of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FacingDef {
    North,
    #[default]
    East,
    South,
    West,
}
