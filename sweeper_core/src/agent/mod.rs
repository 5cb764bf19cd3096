//! Agent - picks moves from what the knowledge base has proven.
//!
//! Move selection works as follows:
//! 1. **Safe**: play a random cell proven safe and not yet played
//! 2. **Guess**: otherwise play a cell that is neither played nor a known mine
//! 3. **Stuck**: otherwise report that no move is available

use log::{debug, warn};
use minefield::Cell;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::KnowledgeError;
use crate::knowledge_base::{Deductions, KnowledgeBase};

/// How the agent guesses when no cell is proven safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessStrategy {
    /// The first untried cell in row-major order.
    #[default]
    FirstUntried,
    /// A uniformly random untried cell.
    Uniform,
}

/// Configuration for the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub strategy: GuessStrategy,

    /// Seed for move randomisation. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// A move chosen by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// A cell proven safe.
    Safe(Cell),
    /// A cell whose status is unknown.
    Guess(Cell),
    /// Every cell is either played or a known mine.
    NoMoveAvailable,
}

impl Move {
    /// Get the chosen cell, if any.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            Move::Safe(cell) | Move::Guess(cell) => Some(*cell),
            Move::NoMoveAvailable => None,
        }
    }
}

/// Minesweeper player backed by a knowledge base.
#[derive(Debug, Clone)]
pub struct Agent {
    knowledge: KnowledgeBase,
    config: AgentConfig,
    rng: StdRng,
}

impl Agent {
    /// Create a new agent for a `height` x `width` board.
    pub fn new(height: usize, width: usize, config: AgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            knowledge: KnowledgeBase::new(height, width),
            config,
            rng,
        }
    }

    /// Create an agent with default configuration.
    pub fn with_defaults(height: usize, width: usize) -> Self {
        Self::new(height, width, AgentConfig::default())
    }

    /// Called when the board reports, for a revealed safe cell, how many of its
    /// neighbors are mines.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) -> Result<Deductions, KnowledgeError> {
        self.knowledge.record_observation(cell, count)
    }

    /// Pick a cell proven safe that has not been played yet.
    pub fn make_safe_move(&mut self) -> Option<Cell> {
        let mut candidates: Vec<Cell> = self.knowledge.safe_unplayed_moves().into_iter().collect();
        // Sorted so a seeded agent picks the same cell every run
        candidates.sort();
        candidates.choose(&mut self.rng).copied()
    }

    /// Pick a cell that has not been played and is not known to be a mine.
    pub fn make_random_move(&mut self) -> Option<Cell> {
        let (height, width) = self.knowledge.dimensions();
        match self.config.strategy {
            GuessStrategy::FirstUntried => self.knowledge.any_untried_cell(width, height),
            GuessStrategy::Uniform => self.knowledge.untried_cells().choose(&mut self.rng).copied(),
        }
    }

    /// Pick the next move, preferring proven-safe cells over guesses.
    pub fn next_move(&mut self) -> Move {
        if let Some(cell) = self.make_safe_move() {
            debug!("Safe move: {}", cell);
            return Move::Safe(cell);
        }
        match self.make_random_move() {
            Some(cell) => {
                warn!("No known safe moves, guessing {}", cell);
                Move::Guess(cell)
            }
            None => Move::NoMoveAvailable,
        }
    }

    /// Cells the agent would flag: everything proven to be a mine.
    pub fn flags(&self) -> &HashSet<Cell> {
        self.knowledge.mine_cells()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
