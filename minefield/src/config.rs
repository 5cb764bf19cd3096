//! Board configuration.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Dimensions and mine count of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl BoardConfig {
    /// Create a new board configuration.
    pub fn new(height: usize, width: usize, mines: usize) -> Self {
        Self {
            height,
            width,
            mines,
        }
    }

    /// Parse a configuration from a TOML document.
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Total number of cells on the board.
    pub fn cell_count(&self) -> Result<usize, BoardError> {
        self.height
            .checked_mul(self.width)
            .ok_or(BoardError::TooLarge {
                height: self.height,
                width: self.width,
            })
    }

    /// Check that a board with this configuration can exist.
    ///
    /// Returns the number of cells on the board.
    pub fn validate(&self) -> Result<usize, BoardError> {
        if self.height == 0 || self.width == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let cells = self.cell_count()?;
        if self.mines > cells {
            return Err(BoardError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(cells)
    }
}
