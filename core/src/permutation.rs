use crate::arc::Arc;
use crate::color::Color;
use crate::sticker::Sticker;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermutationError {
    #[error("slot {slot} is outside a puzzle of {size} slots")]
    SlotOutOfRange { slot: usize, size: usize },
    #[error("slot {slot} appears in more than one cycle position")]
    RepeatedSlot { slot: usize },
    #[error("cannot compose permutations of {left} and {right} slots")]
    SizeMismatch { left: usize, right: usize },
}

/// A colored bijection over slot indices.
///
/// `mapping[i]` is the slot that the sticker sitting on slot `i` moves to.
#[derive(Clone, Debug, PartialEq)]
pub struct Permutation {
    index: usize,
    reverse_index: usize,
    color: Color,
    mapping: Vec<usize>,
}

impl Permutation {
    pub fn identity(index: usize, color: Color, size: usize) -> Self {
        Self {
            index,
            reverse_index: 0,
            color,
            mapping: (0..size).collect(),
        }
    }

    /// Builds a permutation from disjoint cycles; `[c0, c1, .., ck]` sends
    /// `c0 -> c1 -> .. -> ck -> c0`. Slots not listed stay where they are.
    pub fn from_cycles(
        index: usize,
        color: Color,
        size: usize,
        cycles: &[Vec<usize>],
    ) -> Result<Self, PermutationError> {
        let mut permutation = Self::identity(index, color, size);
        let mut seen = vec![false; size];
        for cycle in cycles {
            for &slot in cycle {
                if slot >= size {
                    return Err(PermutationError::SlotOutOfRange { slot, size });
                }
                if seen[slot] {
                    return Err(PermutationError::RepeatedSlot { slot });
                }
                seen[slot] = true;
            }
            for (pos, &slot) in cycle.iter().enumerate() {
                permutation.mapping[slot] = cycle[(pos + 1) % cycle.len()];
            }
        }
        Ok(permutation)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reverse_index(&self) -> usize {
        self.reverse_index
    }

    pub(crate) fn set_reverse_index(&mut self, reverse_index: usize) {
        self.reverse_index = reverse_index;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.mapping.iter().enumerate().all(|(i, &j)| i == j)
    }

    /// Where `slot` goes, or where it comes from when `inverted`.
    pub fn next(&self, slot: usize, inverted: bool) -> Option<usize> {
        if inverted {
            self.mapping.iter().position(|&target| target == slot)
        } else {
            self.mapping.get(slot).copied()
        }
    }

    /// Composition where `rhs` acts first: `result[i] = self[rhs[i]]`.
    pub fn multiply(&self, rhs: &Permutation) -> Result<Permutation, PermutationError> {
        if self.len() != rhs.len() {
            return Err(PermutationError::SizeMismatch {
                left: self.len(),
                right: rhs.len(),
            });
        }
        let mapping = rhs.mapping.iter().map(|&j| self.mapping[j]).collect();
        Ok(Permutation {
            index: self.index,
            reverse_index: self.reverse_index,
            color: self.color,
            mapping,
        })
    }

    /// Cycle decomposition without fixed points, each cycle starting at its
    /// smallest slot.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.len()];
        let mut cycles = Vec::new();
        for start in 0..self.len() {
            if visited[start] || self.mapping[start] == start {
                continue;
            }
            let mut cycle = Vec::new();
            let mut slot = start;
            while !visited[slot] {
                visited[slot] = true;
                cycle.push(slot);
                slot = self.mapping[slot];
            }
            cycles.push(cycle);
        }
        cycles
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub(crate) fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Moves every sticker along this permutation and starts its animation.
    ///
    /// `arcs[i]` is the path for the pair `(i, mapping[i])`. All moves read
    /// from the arrangement as it was before the call. Fixed points are left
    /// untouched, including any animation still in flight.
    pub fn apply(&self, stickers: &mut [Sticker], arcs: &[Arc], inverted: bool, now_ms: f64) {
        let previous = stickers.to_vec();
        for (from, &to) in self.mapping.iter().enumerate() {
            if from == to {
                continue;
            }
            let (source, target) = if inverted { (to, from) } else { (from, to) };
            let (Some(sticker), Some(slot)) = (previous.get(source), stickers.get_mut(target))
            else {
                continue;
            };
            let mut moved = sticker.clone();
            match arcs.get(from) {
                Some(arc) => moved.start_move(target, arc.clone(), inverted, now_ms),
                None => moved.settle(target),
            }
            *slot = moved;
        }
    }
}
