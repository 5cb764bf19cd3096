//! Sentence definitions - "exactly `count` of these cells are mines".

use minefield::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::KnowledgeError;

/// A logical statement about a Minesweeper game.
///
/// Cells are kept sorted, so two sentences compare equal exactly when they
/// mention the same cells with the same count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a new sentence over the given cells.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// An empty sentence with a zero count says nothing.
    pub fn is_tautology(&self) -> bool {
        self.cells.is_empty() && self.count == 0
    }

    /// An empty sentence with a positive count can never hold.
    pub fn is_contradiction(&self) -> bool {
        self.cells.is_empty() && self.count > 0
    }

    /// Get the cells known to be mines: all of them when every cell must be a mine.
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if self.cells.len() == self.count && self.count != 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Get the cells known to be safe: all of them when the count is zero.
    pub fn known_safes(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Drop a cell known to be safe. Returns whether the cell was present.
    pub fn mark_safe(&mut self, cell: &Cell) -> bool {
        self.cells.remove(cell)
    }

    /// Drop a cell known to be a mine and lower the count accordingly.
    /// Returns whether the cell was present.
    pub fn mark_mine(&mut self, cell: &Cell) -> Result<bool, KnowledgeError> {
        if !self.cells.contains(cell) {
            return Ok(false);
        }
        self.count = self
            .count
            .checked_sub(1)
            .ok_or(KnowledgeError::NegativeCount { cell: *cell })?;
        self.cells.remove(cell);
        Ok(true)
    }

    /// Check if every cell of this sentence also appears in `other`.
    pub fn is_subset_of(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Derive the sentence covering the cells `other` has beyond `self`.
    ///
    /// Only meaningful when `self` is a subset of `other`: the extra cells carry the
    /// mines `other` has left over once `self`'s mines are accounted for.
    pub fn difference(&self, other: &Sentence) -> Result<Sentence, KnowledgeError> {
        let count = other
            .count
            .checked_sub(self.count)
            .ok_or_else(|| KnowledgeError::CountExceedsSuperset {
                subset: self.clone(),
                superset: other.clone(),
            })?;
        Ok(Sentence {
            cells: other.cells.difference(&self.cells).copied().collect(),
            count,
        })
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<String> = self.cells.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}} = {}", cells.join(", "), self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        let b = Sentence::new(cells(&[(0, 1), (0, 0)]), 1);
        let c = Sentence::new(cells(&[(0, 1), (0, 0)]), 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_known_mines() {
        let all_mines = Sentence::new(cells(&[(0, 0), (0, 1)]), 2);
        assert_eq!(all_mines.known_mines().len(), 2);
        assert!(all_mines.known_safes().is_empty());

        let undetermined = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        assert!(undetermined.known_mines().is_empty());
        assert!(undetermined.known_safes().is_empty());

        // An empty sentence never yields mines
        assert!(Sentence::new(vec![], 0).known_mines().is_empty());
    }

    #[test]
    fn test_known_safes() {
        let all_safe = Sentence::new(cells(&[(1, 1), (2, 2)]), 0);
        assert_eq!(
            all_safe.known_safes(),
            cells(&[(1, 1), (2, 2)]).into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_mark_safe_keeps_count() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 1);
        assert!(sentence.mark_safe(&Cell::new(0, 1)));
        assert!(!sentence.mark_safe(&Cell::new(0, 1)));
        assert_eq!(sentence, Sentence::new(cells(&[(0, 0), (0, 2)]), 1));
    }

    #[test]
    fn test_mark_mine_lowers_count() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);
        assert_eq!(sentence.mark_mine(&Cell::new(0, 0)), Ok(true));
        assert_eq!(sentence, Sentence::new(cells(&[(0, 1), (0, 2)]), 1));

        // Cells outside the sentence are ignored
        assert_eq!(sentence.mark_mine(&Cell::new(5, 5)), Ok(false));
        assert_eq!(sentence.count(), 1);
    }

    #[test]
    fn test_mark_mine_in_zero_count_sentence() {
        let mut sentence = Sentence::new(cells(&[(0, 0)]), 0);
        assert_eq!(
            sentence.mark_mine(&Cell::new(0, 0)),
            Err(KnowledgeError::NegativeCount {
                cell: Cell::new(0, 0)
            })
        );
        // Failed marks leave the sentence untouched
        assert_eq!(sentence, Sentence::new(cells(&[(0, 0)]), 0));
    }

    #[test]
    fn test_difference() {
        let big = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 1);
        let small = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        assert!(small.is_subset_of(&big));
        assert!(!big.is_subset_of(&small));
        assert_eq!(
            small.difference(&big),
            Ok(Sentence::new(cells(&[(0, 2)]), 0))
        );
    }

    #[test]
    fn test_tautology_and_contradiction() {
        assert!(Sentence::new(vec![], 0).is_tautology());
        assert!(!Sentence::new(vec![], 0).is_contradiction());
        assert!(Sentence::new(vec![], 1).is_contradiction());
        assert!(!Sentence::new(cells(&[(0, 0)]), 0).is_tautology());
    }

    #[test]
    fn test_display() {
        let sentence = Sentence::new(cells(&[(0, 1), (0, 0)]), 1);
        assert_eq!(sentence.to_string(), "{(0, 0), (0, 1)} = 1");
    }
}
