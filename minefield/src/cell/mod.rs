//! Cell coordinates and game identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A board coordinate. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a new cell at the given row and column.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether the cell lies on a `height` x `width` board.
    pub fn in_bounds(&self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// Get the up-to-8 adjacent cells that lie on a `height` x `width` board,
    /// in row-major order. The cell itself is never included.
    pub fn neighbors(&self, height: usize, width: usize) -> Vec<Cell> {
        let mut neighbors = Vec::with_capacity(8);
        let rows = self.row.saturating_sub(1)..=(self.row + 1).min(height.saturating_sub(1));
        for row in rows {
            let cols = self.col.saturating_sub(1)..=(self.col + 1).min(width.saturating_sub(1));
            for col in cols {
                let neighbor = Cell::new(row, col);
                if neighbor != *self && neighbor.in_bounds(height, width) {
                    neighbors.push(neighbor);
                }
            }
        }
        neighbors
    }

    /// Iterate over every cell of a `height` x `width` board in row-major order.
    pub fn all(height: usize, width: usize) -> impl Iterator<Item = Cell> {
        (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Unique identifier for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Create a new random game ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
