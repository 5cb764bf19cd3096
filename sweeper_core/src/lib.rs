//! # Sweeper Core
//!
//! A knowledge-base Minesweeper player. This crate consumes the ground truth in
//! `minefield`, keeps logical sentences about the cells it has seen, and derives
//! safe cells and mines from them.
//!
//! ## Core Components
//!
//! - **knowledge_base**: Sentences and the fixed-point inference loop
//! - **agent**: Move selection from proven-safe cells, falling back to guesses
//! - **game**: Sessions that let an agent play a board to the end
//!
//! ## Inference Rules
//!
//! - **Cardinality saturation**: a sentence with count zero makes all its cells safe;
//!   a sentence with as many mines as cells makes all of them mines
//! - **Subset difference**: if one sentence's cells are contained in another's, the
//!   extra cells carry the leftover mine count

pub mod agent;
pub mod error;
pub mod game;
pub mod knowledge_base;

pub use agent::*;
pub use error::*;
pub use game::*;
pub use knowledge_base::*;
