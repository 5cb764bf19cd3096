//! Knowledge Base - the sentence store and its fixed-point inference loop.

use log::{debug, trace};
use minefield::Cell;
use std::collections::{BTreeSet, HashSet};

use super::{KnowledgeSnapshot, Sentence};
use crate::error::KnowledgeError;

/// What a single observation taught the knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deductions {
    /// Cells proven safe by this observation, excluding the observed cell itself.
    pub new_safes: BTreeSet<Cell>,

    /// Cells proven to be mines by this observation.
    pub new_mines: BTreeSet<Cell>,

    /// Sentences added by subset inference.
    pub sentences_inferred: usize,

    /// Full inference passes run before reaching the fixed point.
    pub passes: usize,
}

impl Deductions {
    /// Check if the observation proved anything about other cells.
    pub fn is_empty(&self) -> bool {
        self.new_safes.is_empty() && self.new_mines.is_empty()
    }
}

/// Everything the agent knows about one game.
///
/// The three cell sets only ever grow. Sentences are updated in place whenever a
/// cell is proven safe or a mine, and dropped once they say nothing.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,

    /// Cells already chosen.
    moves_made: HashSet<Cell>,

    /// Cells proven mine-free.
    safe: HashSet<Cell>,

    /// Cells proven to be mines.
    mines: HashSet<Cell>,

    /// Sentences known to be true, in insertion order.
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for a `height` x `width` board.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            moves_made: HashSet::new(),
            safe: HashSet::new(),
            mines: HashSet::new(),
            sentences: Vec::new(),
        }
    }

    /// Record that `cell` was revealed and has `count` mines among its neighbors.
    ///
    /// 1. Remember the move and mark the cell safe
    /// 2. Add a sentence over the neighbors whose status is still unknown, with the
    ///    count lowered by the neighbors already known to be mines
    /// 3. Run inference until a full pass changes nothing
    pub fn record_observation(
        &mut self,
        cell: Cell,
        count: usize,
    ) -> Result<Deductions, KnowledgeError> {
        if !cell.in_bounds(self.height, self.width) {
            return Err(KnowledgeError::OutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            });
        }

        let safe_before = self.safe.clone();
        let mines_before = self.mines.clone();

        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let sentence = self.neighbor_sentence(cell, count)?;
        debug!("Observed {} with {} neighboring mine(s): {}", cell, count, sentence);
        self.sentences.push(sentence);

        let (passes, sentences_inferred) = self.infer()?;

        Ok(Deductions {
            new_safes: self
                .safe
                .difference(&safe_before)
                .filter(|c| **c != cell)
                .copied()
                .collect(),
            new_mines: self.mines.difference(&mines_before).copied().collect(),
            sentences_inferred,
            passes,
        })
    }

    /// Build the sentence an observation contributes about the cell's neighbors.
    fn neighbor_sentence(&self, cell: Cell, count: usize) -> Result<Sentence, KnowledgeError> {
        let mut remaining = count;
        let mut unknown = Vec::with_capacity(8);

        for neighbor in cell.neighbors(self.height, self.width) {
            if self.safe.contains(&neighbor) {
                continue;
            }
            if self.mines.contains(&neighbor) {
                remaining = remaining
                    .checked_sub(1)
                    .ok_or(KnowledgeError::ObservationUnderflow { cell, count })?;
                continue;
            }
            unknown.push(neighbor);
        }

        Ok(Sentence::new(unknown, remaining))
    }

    /// Mark a cell as safe and drop it from every sentence.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.safe.insert(cell);
        for sentence in self.sentences.iter_mut() {
            sentence.mark_safe(&cell);
        }
    }

    /// Mark a cell as a mine, dropping it from every sentence and lowering their counts.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        self.mines.insert(cell);
        for sentence in self.sentences.iter_mut() {
            sentence.mark_mine(&cell)?;
        }
        Ok(())
    }

    /// Run inference passes until one changes nothing.
    ///
    /// Returns the number of passes and the number of sentences inferred.
    fn infer(&mut self) -> Result<(usize, usize), KnowledgeError> {
        let mut passes = 0;
        let mut inferred = 0;

        loop {
            passes += 1;
            let mut changed = false;

            // Step 1: collect everything the sentences settle on their own
            let mut safes = BTreeSet::new();
            let mut mines = BTreeSet::new();
            for sentence in &self.sentences {
                safes.extend(sentence.known_safes());
                mines.extend(sentence.known_mines());
            }

            // Step 2: apply them to the whole knowledge base
            if !safes.is_empty() {
                changed = true;
                for cell in &safes {
                    self.mark_safe(*cell);
                }
            }
            if !mines.is_empty() {
                changed = true;
                for cell in &mines {
                    self.mark_mine(*cell)?;
                }
            }

            // Step 3: drop sentences that no longer say anything, or repeat an earlier one
            let mut seen = HashSet::with_capacity(self.sentences.len());
            self.sentences
                .retain(|sentence| !sentence.is_tautology() && seen.insert(sentence.clone()));
            if let Some(sentence) = self.sentences.iter().find(|s| s.is_contradiction()) {
                return Err(KnowledgeError::InconsistentKnowledge {
                    count: sentence.count(),
                });
            }

            // Step 4: subset inference
            let derived = self.infer_from_subsets()?;
            if derived > 0 {
                changed = true;
                inferred += derived;
            }

            trace!(
                "Inference pass {}: {} safe, {} mine(s), {} new sentence(s), {} sentence(s) held",
                passes,
                safes.len(),
                mines.len(),
                derived,
                self.sentences.len()
            );

            if !changed {
                return Ok((passes, inferred));
            }
        }
    }

    /// For every ordered pair of sentences where the first one's cells are a proper
    /// subset of the second one's, add the difference sentence if it is new.
    ///
    /// Sentences added here take part in the same scan.
    fn infer_from_subsets(&mut self) -> Result<usize, KnowledgeError> {
        let mut derived = 0;

        let mut i = 0;
        while i < self.sentences.len() {
            let mut j = 0;
            while j < self.sentences.len() {
                let first = &self.sentences[i];
                let second = &self.sentences[j];
                if first.cells() != second.cells() && first.is_subset_of(second) {
                    let sentence = first.difference(second)?;
                    if !self.sentences.contains(&sentence) {
                        debug!(
                            "New inferred knowledge: {} from {} and {}",
                            sentence, first, second
                        );
                        self.sentences.push(sentence);
                        derived += 1;
                    }
                }
                j += 1;
            }
            i += 1;
        }

        Ok(derived)
    }

    /// Get the cells known to be safe that have not been played yet.
    pub fn safe_unplayed_moves(&self) -> HashSet<Cell> {
        self.safe.difference(&self.moves_made).copied().collect()
    }

    /// Find the first cell, in row-major order, that has not been played and is not
    /// known to be a mine.
    pub fn any_untried_cell(&self, width: usize, height: usize) -> Option<Cell> {
        Cell::all(height, width).find(|cell| self.is_untried(cell))
    }

    /// Get every cell that has not been played and is not known to be a mine.
    pub fn untried_cells(&self) -> Vec<Cell> {
        Cell::all(self.height, self.width)
            .filter(|cell| self.is_untried(cell))
            .collect()
    }

    fn is_untried(&self, cell: &Cell) -> bool {
        !self.moves_made.contains(cell) && !self.mines.contains(cell)
    }

    /// Get the board dimensions as `(height, width)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn safe_cells(&self) -> &HashSet<Cell> {
        &self.safe
    }

    pub fn mine_cells(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn is_known_safe(&self, cell: &Cell) -> bool {
        self.safe.contains(cell)
    }

    pub fn is_known_mine(&self, cell: &Cell) -> bool {
        self.mines.contains(cell)
    }

    /// Take a sorted, serializable picture of the current knowledge.
    pub fn snapshot(&self) -> KnowledgeSnapshot {
        let sorted = |cells: &HashSet<Cell>| -> Vec<Cell> {
            let mut cells: Vec<Cell> = cells.iter().copied().collect();
            cells.sort();
            cells
        };

        KnowledgeSnapshot {
            height: self.height,
            width: self.width,
            moves_made: sorted(&self.moves_made),
            safe: sorted(&self.safe),
            mines: sorted(&self.mines),
            sentences: self.sentences.clone(),
        }
    }
}
