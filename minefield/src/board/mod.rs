//! The board - ground-truth mine layout and the neighbor-count oracle.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cell::Cell;
use crate::config::BoardConfig;
use crate::error::BoardError;

/// Ground-truth representation of a game (i.e. where the mines are).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    height: usize,
    width: usize,

    /// Row-major grid, `true` where a mine sits.
    layout: Vec<Vec<bool>>,

    /// The same mines, as a set.
    mines: HashSet<Cell>,
}

impl Board {
    /// Generate a new board with `config.mines` mines distributed uniformly at random.
    ///
    /// Cells are visited in row-major order and each one is picked with probability
    /// `mines_left_to_pick / cells_left_to_pick_from`, which yields exactly the requested
    /// number of mines.
    pub fn generate<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<Self, BoardError> {
        let cell_count = config.validate()?;
        let mut layout = vec![vec![false; config.width]; config.height];
        let mut mines = HashSet::with_capacity(config.mines);

        for (index, cell) in Cell::all(config.height, config.width).enumerate() {
            let left_to_pick = (config.mines - mines.len()) as f64;
            let left_to_pick_from = (cell_count - index) as f64;
            if left_to_pick > 0.0 && rng.gen_bool(left_to_pick / left_to_pick_from) {
                layout[cell.row][cell.col] = true;
                mines.insert(cell);
            }
        }

        Ok(Self {
            height: config.height,
            width: config.width,
            layout,
            mines,
        })
    }

    /// Build a board from an explicit layout, `true` marking a mine.
    pub fn from_layout(layout: Vec<Vec<bool>>) -> Result<Self, BoardError> {
        let height = layout.len();
        let width = layout.first().map(|row| row.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(BoardError::EmptyBoard);
        }

        let mut mines = HashSet::new();
        for (row, cells) in layout.iter().enumerate() {
            if cells.len() != width {
                return Err(BoardError::RaggedLayout {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            for (col, is_mine) in cells.iter().enumerate() {
                if *is_mine {
                    mines.insert(Cell::new(row, col));
                }
            }
        }

        Ok(Self {
            height,
            width,
            layout,
            mines,
        })
    }

    /// Get the board dimensions as `(height, width)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Check whether a cell lies on this board.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.height, self.width)
    }

    /// Check whether a cell holds a mine. Cells off the board never do.
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.contains(cell) && self.layout[cell.row][cell.col]
    }

    /// Count the mines among a cell's in-bounds neighbors, not including the cell itself.
    pub fn neighbor_mine_count(&self, cell: Cell) -> usize {
        cell.neighbors(self.height, self.width)
            .into_iter()
            .filter(|neighbor| self.is_mine(*neighbor))
            .count()
    }

    /// Check if exactly the mines have been flagged.
    pub fn all_mines_flagged(&self, flagged: &HashSet<Cell>) -> bool {
        *flagged == self.mines
    }

    /// Get the total number of mines.
    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    /// Get the number of cells that are not mines.
    pub fn safe_cell_count(&self) -> usize {
        self.height * self.width - self.mines.len()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let divider = "--".repeat(self.width) + "-";
        for row in &self.layout {
            writeln!(f, "{}", divider)?;
            for is_mine in row {
                write!(f, "{}", if *is_mine { "|X" } else { "| " })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", divider)
    }
}
