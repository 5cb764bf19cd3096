//! # Minefield
//!
//! Ground truth for Minesweeper games - cell coordinates, mine layouts, and the
//! neighbor-count oracle. This crate is the single source of truth for where the
//! mines are and does not contain any inference logic.

pub mod board;
pub mod cell;
pub mod config;
pub mod error;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
