//! Pose -- the robot's dynamic state during one run.

use std::fmt;

use robomaze_data::FacingDef;
use serde::{Deserialize, Serialize};

use crate::maze::Position;

/// Cardinal facing, cyclically ordered North -> East -> South -> West.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Clockwise successor.
    pub fn turned_right(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    /// Counter-clockwise predecessor.
    pub fn turned_left(self) -> Facing {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    /// Unit (row, col) displacement of one move forward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Facing::North => (-1, 0),
            Facing::East => (0, 1),
            Facing::South => (1, 0),
            Facing::West => (0, -1),
        }
    }

    /// Arrow glyph used when drawing the robot.
    pub fn arrow(self) -> char {
        match self {
            Facing::North => '↑',
            Facing::East => '→',
            Facing::South => '↓',
            Facing::West => '←',
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facing::North => "North",
            Facing::East => "East",
            Facing::South => "South",
            Facing::West => "West",
        };
        write!(f, "{name}")
    }
}

impl From<FacingDef> for Facing {
    fn from(value: FacingDef) -> Self {
        match value {
            FacingDef::North => Facing::North,
            FacingDef::East => Facing::East,
            FacingDef::South => Facing::South,
            FacingDef::West => Facing::West,
        }
    }
}

/// Position, facing and cumulative move count of the robot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub row: usize,
    pub col: usize,
    pub facing: Facing,
    pub total_steps: u32,
}

impl Pose {
    /// Fresh pose with a zero step count.
    pub fn new(position: Position, facing: Facing) -> Self {
        Self {
            row: position.row,
            col: position.col,
            facing,
            total_steps: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}
