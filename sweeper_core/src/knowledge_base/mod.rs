//! Knowledge Base module - what the agent has learned about one game.
//!
//! The knowledge base consists of:
//! - **Sentences**: "exactly N of these cells are mines" constraints
//! - **Known cells**: cells played, proven safe, or proven to be mines
//! - **Inference**: cardinality saturation and subset-difference, run to a fixed point

mod engine;
mod sentence;
mod snapshot;

pub use engine::*;
pub use sentence::*;
pub use snapshot::*;
