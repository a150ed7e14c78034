use rand::Rng;
use tracing::info;

use crate::action::PuzzleAction;
use crate::builder::BuildError;
use crate::catalog::Catalog;
use crate::puzzle::PuzzleData;

/// Catalog selection plus the live puzzle. Owned by the caller and handed
/// to every entry point.
#[derive(Clone, Debug)]
pub struct CoreState {
    catalog: Catalog,
    puzzle_index: usize,
    puzzle: PuzzleData,
    moves: u32,
}

impl CoreState {
    pub fn new(catalog: Catalog) -> Result<Self, BuildError> {
        let index = catalog.default_index();
        Self::with_selection(catalog, index)
    }

    pub fn with_selection(catalog: Catalog, index: usize) -> Result<Self, BuildError> {
        let puzzle_index = wrap_index(index as i64, catalog.len());
        let puzzle = build_entry(&catalog, puzzle_index)?;
        Ok(Self {
            catalog,
            puzzle_index,
            puzzle,
            moves: 0,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn puzzle_index(&self) -> usize {
        self.puzzle_index
    }

    pub fn puzzle(&self) -> &PuzzleData {
        &self.puzzle
    }

    /// Permutations applied since the puzzle was selected or scrambled.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Selects catalog entry `index`, wrapping around the catalog length.
    pub fn select(&mut self, index: i64) -> Result<(), BuildError> {
        let index = wrap_index(index, self.catalog.len());
        self.puzzle = build_entry(&self.catalog, index)?;
        self.puzzle_index = index;
        self.moves = 0;
        info!(index, puzzle = %self.puzzle.name(), "selected puzzle");
        Ok(())
    }

    /// Handles one input action. Returns whether anything changed.
    pub fn apply<R: Rng>(
        &mut self,
        action: PuzzleAction,
        now_ms: f64,
        rng: &mut R,
    ) -> Result<bool, BuildError> {
        match action {
            PuzzleAction::Activate { index, inverted } => {
                let applied = self.puzzle.activate_permutation(index, inverted, now_ms);
                if applied {
                    self.moves = self.moves.saturating_add(1);
                }
                Ok(applied)
            }
            PuzzleAction::Randomize => {
                self.puzzle.randomize(rng, now_ms);
                self.moves = 0;
                Ok(!self.puzzle.permutations().is_empty())
            }
            PuzzleAction::Solve => {
                self.puzzle.solve();
                Ok(true)
            }
            PuzzleAction::SwitchPuzzle { index } => {
                self.select(index as i64)?;
                Ok(true)
            }
            PuzzleAction::NextPuzzle => {
                self.select(self.puzzle_index as i64 + 1)?;
                Ok(true)
            }
            PuzzleAction::PrevPuzzle => {
                self.select(self.puzzle_index as i64 - 1)?;
                Ok(true)
            }
        }
    }
}

fn wrap_index(index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as i64) as usize
}

fn build_entry(catalog: &Catalog, index: usize) -> Result<PuzzleData, BuildError> {
    match catalog.get(index) {
        Some(definition) => definition.build(),
        None => Ok(PuzzleData::new("empty")),
    }
}
