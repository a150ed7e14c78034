use std::collections::HashMap;

use tracing::{info, warn};

use crate::arc::{Arc, CircleParams};
use crate::color::Color;
use crate::permutation::{Permutation, PermutationError};
use crate::puzzle::PuzzleData;
use crate::vector::Vec2;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("node {0:?} is declared twice")]
    DuplicateNode(String),
    #[error("node {0:?} is declared after the first permutation")]
    LateNode(String),
    #[error("unknown node {0:?}")]
    UnknownNode(String),
    #[error("no permutation with color {0}")]
    UnknownPermutation(Color),
    #[error("color {0} is already used by another permutation")]
    DuplicatePermutation(Color),
    #[error("combo {0} lists no permutations")]
    EmptyCombo(Color),
    #[error(transparent)]
    Permutation(#[from] PermutationError),
}

/// Assembles a [`PuzzleData`] from node, permutation and arc declarations.
///
/// Nodes come first and their order fixes slot indices. Every permutation
/// starts with straight arcs; [`PuzzleBuilder::arc`] swaps single entries for
/// circular ones.
#[derive(Debug)]
pub struct PuzzleBuilder {
    puzzle: PuzzleData,
    node_index: HashMap<String, usize>,
}

impl PuzzleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            puzzle: PuzzleData::new(name),
            node_index: HashMap::new(),
        }
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.node_index.get(name).copied()
    }

    pub fn node(&mut self, name: &str, color: Color, x: f32, y: f32) -> Result<usize, BuildError> {
        if !self.puzzle.permutations().is_empty() {
            return Err(BuildError::LateNode(name.to_string()));
        }
        if self.node_index.contains_key(name) {
            return Err(BuildError::DuplicateNode(name.to_string()));
        }
        let index = self.puzzle.add_slot(name, Vec2::new(x, y), color);
        self.node_index.insert(name.to_string(), index);
        Ok(index)
    }

    /// Registers a permutation from cycles of slot indices.
    pub fn permutation(&mut self, color: Color, cycles: &[Vec<usize>]) -> Result<usize, BuildError> {
        self.ensure_unused(color)?;
        let size = self.puzzle.slots().len();
        let permutation = Permutation::from_cycles(0, color, size, cycles)?;
        Ok(self.puzzle.add_permutation(permutation))
    }

    /// Registers a permutation from cycles of node names.
    pub fn named_permutation<S: AsRef<str>>(
        &mut self,
        color: Color,
        cycles: &[Vec<S>],
    ) -> Result<usize, BuildError> {
        let cycles = cycles
            .iter()
            .map(|cycle| {
                cycle
                    .iter()
                    .map(|name| self.resolve(name.as_ref()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.permutation(color, &cycles)
    }

    /// Registers the product of already declared permutations. The last one
    /// listed acts first.
    pub fn combo(&mut self, color: Color, parts: &[Color]) -> Result<usize, BuildError> {
        self.ensure_unused(color)?;
        let mut factors = parts.iter().map(|part| {
            self.puzzle
                .permutation_by_color(*part)
                .ok_or(BuildError::UnknownPermutation(*part))
        });
        let first = factors.next().ok_or(BuildError::EmptyCombo(color))??;
        let mut product = first.clone();
        for factor in factors {
            product = product.multiply(factor?)?;
        }
        let product = product.with_color(color);
        if product.is_identity() {
            warn!(puzzle = %self.puzzle.name(), %color, "combo moves no slots");
        }
        Ok(self.puzzle.add_permutation(product))
    }

    /// Replaces the arc leaving `node` under the permutation colored `color`
    /// with a circular one. The far endpoint is wherever that permutation
    /// sends `node`.
    pub fn arc(&mut self, color: Color, node: &str, params: CircleParams) -> Result<(), BuildError> {
        let from = self.resolve(node)?;
        let permutation = self
            .puzzle
            .permutation_by_color(color)
            .ok_or(BuildError::UnknownPermutation(color))?;
        let index = permutation.index();
        let to = permutation
            .next(from, false)
            .ok_or_else(|| BuildError::UnknownNode(node.to_string()))?;
        let slots = self.puzzle.slots();
        let arc = Arc::circle(
            index,
            from,
            to,
            slots[from].position(),
            slots[to].position(),
            params,
        );
        self.puzzle.set_arc(index, arc);
        Ok(())
    }

    pub fn recenter(&mut self) -> &mut Self {
        self.puzzle.recenter();
        self
    }

    pub fn normalize(&mut self) -> &mut Self {
        self.puzzle.normalize();
        self
    }

    pub fn finish(mut self) -> PuzzleData {
        self.puzzle.assign_reverse_indices();
        info!(
            puzzle = %self.puzzle.name(),
            slots = self.puzzle.slots().len(),
            permutations = self.puzzle.permutations().len(),
            "built puzzle"
        );
        self.puzzle
    }

    // Colors address permutations, so each one may be registered once.
    fn ensure_unused(&self, color: Color) -> Result<(), BuildError> {
        match self.puzzle.permutation_by_color(color) {
            Some(_) => Err(BuildError::DuplicatePermutation(color)),
            None => Ok(()),
        }
    }

    fn resolve(&self, name: &str) -> Result<usize, BuildError> {
        self.node_index(name)
            .ok_or_else(|| BuildError::UnknownNode(name.to_string()))
    }
}
