//! Errors raised while building a board.

use thiserror::Error;

/// Reasons a board cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Height or width is zero.
    #[error("board must have at least one row and one column")]
    EmptyBoard,

    /// Height times width does not fit in a `usize`.
    #[error("board of {height}x{width} cells is too large")]
    TooLarge { height: usize, width: usize },

    /// More mines were requested than the board has cells.
    #[error("too many mines: a board with {cells} cells can hold at most {cells} mines, requested {mines}")]
    TooManyMines { mines: usize, cells: usize },

    /// A layout row does not match the width of the first row.
    #[error("ragged layout: row {row} has {found} columns, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
}
