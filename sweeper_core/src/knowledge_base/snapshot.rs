//! Serializable pictures of a knowledge base.

use minefield::Cell;
use serde::{Deserialize, Serialize};

use super::Sentence;

/// A sorted copy of a knowledge base's contents, for inspection and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    pub height: usize,
    pub width: usize,
    pub moves_made: Vec<Cell>,
    pub safe: Vec<Cell>,
    pub mines: Vec<Cell>,
    pub sentences: Vec<Sentence>,
}

impl KnowledgeSnapshot {
    /// Render the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Read a snapshot back from JSON.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::KnowledgeBase;

    #[test]
    fn test_snapshot_is_sorted() {
        let mut kb = KnowledgeBase::new(3, 3);
        kb.record_observation(Cell::new(2, 2), 0).unwrap();

        let snapshot = kb.snapshot();
        assert_eq!(snapshot.moves_made, vec![Cell::new(2, 2)]);
        assert_eq!(
            snapshot.safe,
            vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(2, 1), Cell::new(2, 2)]
        );
        assert!(snapshot.mines.is_empty());
    }

    #[test]
    fn test_json_export() {
        let mut kb = KnowledgeBase::new(2, 2);
        kb.record_observation(Cell::new(0, 0), 1).unwrap();

        let json = kb.snapshot().to_json().unwrap();
        assert!(json.contains("\"sentences\""));
        assert!(json.contains("\"count\": 1"));

        let restored = KnowledgeSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, kb.snapshot());
    }
}
