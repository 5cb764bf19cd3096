//! Errors raised by the knowledge base and game sessions.

use minefield::{BoardError, Cell};
use thiserror::Error;

use crate::knowledge_base::Sentence;

/// The knowledge base has been fed observations that cannot all be true.
///
/// None of these are recoverable: they point at a faulty oracle or caller, and the
/// current game should be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    /// A sentence claims a positive number of mines over no cells.
    #[error("inconsistent knowledge: {count} mine(s) claimed over no cells")]
    InconsistentKnowledge { count: usize },

    /// Marking a mine drove a sentence count below zero.
    #[error("inconsistent knowledge: marking {cell} as a mine drives a sentence count below zero")]
    NegativeCount { cell: Cell },

    /// A sentence claims more mines than a sentence covering all of its cells.
    #[error("inconsistent knowledge: {subset} claims more mines than {superset}")]
    CountExceedsSuperset { subset: Sentence, superset: Sentence },

    /// An observation reported fewer neighboring mines than are already known.
    #[error("observation at {cell} reports {count} neighboring mine(s), fewer than already known")]
    ObservationUnderflow { cell: Cell, count: usize },

    /// An observation names a cell off the board.
    #[error("cell {cell} lies outside the {height}x{width} board")]
    OutOfBounds {
        cell: Cell,
        height: usize,
        width: usize,
    },
}

/// Errors raised while setting up or playing a game session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),

    #[error("invalid session config: {0}")]
    Config(#[from] toml::de::Error),

    /// A move was requested after the game finished.
    #[error("the game is already over")]
    GameOver,
}
