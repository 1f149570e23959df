//! module: maze
//!
//! Static grid the robot moves through. A `Maze` never changes during a run,
//! so one instance can be shared by reference across any number of runs.

use std::fmt;

use robomaze_data::{EMPTY_CHAR, GOAL_CHAR, WALL_CHAR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pose::Facing;

/// Static classification of a single grid cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tile {
    Empty,
    Wall,
    Goal,
}

impl Tile {
    /// Decode a map character (`#`, `.` or `G`).
    pub fn from_char(ch: char) -> Option<Tile> {
        match ch {
            WALL_CHAR => Some(Tile::Wall),
            EMPTY_CHAR => Some(Tile::Empty),
            GOAL_CHAR => Some(Tile::Goal),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Tile::Empty => EMPTY_CHAR,
            Tile::Wall => WALL_CHAR,
            Tile::Goal => GOAL_CHAR,
        }
    }

    pub fn is_passable(self) -> bool {
        self != Tile::Wall
    }
}

/// Row/column coordinate on the grid. Row 0 is the top edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighboring coordinate one cell ahead in `facing`, or `None` when
    /// that would fall off the top or left edge.
    pub fn ahead(self, facing: Facing) -> Option<Position> {
        let (dr, dc) = facing.delta();
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Malformed maze data handed in by a level provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("maze row {row} has width {found}, expected {expected}")]
    Ragged { row: usize, found: usize, expected: usize },
    #[error("unknown tile '{found}' at {pos}")]
    UnknownTile { pos: Position, found: char },
    #[error("maze has no goal tile")]
    NoGoal,
    #[error("{what} {pos} has no tile in a {rows}x{cols} maze")]
    OutOfBounds {
        what: &'static str,
        pos: Position,
        rows: usize,
        cols: usize,
    },
    #[error("{what} {pos} is a wall")]
    OnWall { what: &'static str, pos: Position },
}

/// Rectangular, row-major grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Maze {
    /// Open grid of the given size with a solid wall border.
    pub fn bordered(rows: usize, cols: usize) -> Self {
        let mut tiles = vec![Tile::Empty; rows * cols];
        for row in 0..rows {
            for col in 0..cols {
                if row == 0 || col == 0 || row + 1 == rows || col + 1 == cols {
                    tiles[row * cols + col] = Tile::Wall;
                }
            }
        }
        Self { rows, cols, tiles }
    }

    /// Build a maze from map rows using `#`, `.` and `G`.
    ///
    /// # Errors
    /// Returns `MazeError` for an empty, ragged or unreadable map.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let first = rows.first().ok_or(MazeError::Empty)?;
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(MazeError::Empty);
        }
        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(MazeError::Ragged {
                    row,
                    found,
                    expected: cols,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(MazeError::UnknownTile {
                    pos: Position::new(row, col),
                    found: ch,
                })?;
                tiles.push(tile);
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            tiles,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Tile at `pos`, or `None` outside the grid.
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.contains(pos).then(|| self.tiles[pos.row * self.cols + pos.col])
    }

    /// Overwrite one tile.
    ///
    /// # Errors
    /// Returns `MazeError::OutOfBounds` if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, tile: Tile) -> Result<(), MazeError> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds("tile", pos));
        }
        self.tiles[pos.row * self.cols + pos.col] = tile;
        Ok(())
    }

    /// Set each interior cell in `cells` to `tile`. Border and off-grid cells
    /// are left as they are.
    pub fn fill_interior(&mut self, cells: impl IntoIterator<Item = Position>, tile: Tile) {
        for pos in cells {
            if pos.row > 0 && pos.col > 0 && pos.row + 1 < self.rows && pos.col + 1 < self.cols {
                self.tiles[pos.row * self.cols + pos.col] = tile;
            }
        }
    }

    /// Position of the first goal tile in row-major order.
    pub fn goal(&self) -> Option<Position> {
        self.tiles
            .iter()
            .position(|t| *t == Tile::Goal)
            .map(|idx| Position::new(idx / self.cols, idx % self.cols))
    }

    /// Require that `pos` exists and is not a wall.
    ///
    /// # Errors
    /// `OutOfBounds` or `OnWall`, tagged with `what` for the message.
    pub fn require_open(&self, what: &'static str, pos: Position) -> Result<(), MazeError> {
        match self.tile(pos) {
            None => Err(self.out_of_bounds(what, pos)),
            Some(Tile::Wall) => Err(MazeError::OnWall { what, pos }),
            Some(_) => Ok(()),
        }
    }

    /// Iterate rows as tile slices, top to bottom.
    pub fn tile_rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.cols.max(1))
    }

    fn out_of_bounds(&self, what: &'static str, pos: Position) -> MazeError {
        MazeError::OutOfBounds {
            what,
            pos,
            rows: self.rows,
            cols: self.cols,
        }
    }
}
