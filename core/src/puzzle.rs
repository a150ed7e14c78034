use rand::Rng;
use tracing::debug;

use crate::arc::{Arc, ARC_SEGMENTS};
use crate::color::Color;
use crate::permutation::Permutation;
use crate::slot::Slot;
use crate::sticker::Sticker;
use crate::surface::Surface;
use crate::vector::{Vec2, EPSILON};

pub const RANDOMIZE_MOVES: usize = 1000;
pub const SLOT_RADIUS: f32 = 0.09;
pub const STICKER_RADIUS: f32 = 0.065;
pub const BACKGROUND_EXTENT: f32 = 1.2;

/// Slots, stickers, permutations and the arc table of one puzzle.
///
/// `stickers[i]` is the sticker on `slots[i]`; that ordering is the only
/// source of truth for placement. `arcs[p][i]` is the path for slot `i`
/// under permutation `p`, filled for every slot when `p` is registered.
#[derive(Clone, Debug)]
pub struct PuzzleData {
    name: String,
    slots: Vec<Slot>,
    stickers: Vec<Sticker>,
    permutations: Vec<Permutation>,
    arcs: Vec<Vec<Arc>>,
}

impl PuzzleData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            stickers: Vec::new(),
            permutations: Vec::new(),
            arcs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn permutations(&self) -> &[Permutation] {
        &self.permutations
    }

    pub fn permutation(&self, index: usize) -> Option<&Permutation> {
        self.permutations.get(index)
    }

    pub fn permutation_by_color(&self, color: Color) -> Option<&Permutation> {
        self.permutations.iter().find(|p| p.color() == color)
    }

    pub fn arcs(&self, permutation: usize) -> Option<&[Arc]> {
        self.arcs.get(permutation).map(Vec::as_slice)
    }

    /// The arc a sticker uses when it moves onto or off `slot`: the pair
    /// `(slot, next(slot))`, or `(prev(slot), slot)` when `inverted`.
    pub fn get_arc(&self, permutation: usize, slot: usize, inverted: bool) -> Option<&Arc> {
        let perm = self.permutations.get(permutation)?;
        let from = if inverted { perm.next(slot, true)? } else { slot };
        self.arcs.get(permutation)?.get(from)
    }

    pub(crate) fn add_slot(&mut self, id: impl Into<String>, position: Vec2, color: Color) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot::new(id, position, color));
        self.stickers.push(Sticker::new(color, index));
        index
    }

    /// Registers `permutation` under the next free index with straight arcs
    /// for every slot.
    pub(crate) fn add_permutation(&mut self, permutation: Permutation) -> usize {
        let index = self.permutations.len();
        let permutation = permutation.with_index(index);
        let arcs = permutation
            .mapping()
            .iter()
            .enumerate()
            .map(|(from, &to)| {
                let u = self.slot_position(from);
                let v = self.slot_position(to);
                Arc::line(index, from, to, u, v)
            })
            .collect();
        self.permutations.push(permutation);
        self.arcs.push(arcs);
        index
    }

    pub(crate) fn set_arc(&mut self, permutation: usize, arc: Arc) -> bool {
        let Some(slot) = self
            .arcs
            .get_mut(permutation)
            .and_then(|arcs| arcs.get_mut(arc.from_slot()))
        else {
            return false;
        };
        *slot = arc;
        true
    }

    pub(crate) fn assign_reverse_indices(&mut self) {
        let count = self.permutations.len();
        for (index, permutation) in self.permutations.iter_mut().enumerate() {
            permutation.set_reverse_index(count - 1 - index);
        }
    }

    fn slot_position(&self, slot: usize) -> Vec2 {
        self.slots.get(slot).map(Slot::position).unwrap_or(Vec2::ZERO)
    }

    /// Translates slots so their centroid is the origin.
    pub(crate) fn recenter(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        let sum = self
            .slots
            .iter()
            .fold(Vec2::ZERO, |acc, slot| acc + slot.position());
        let centroid = sum * (1.0 / self.slots.len() as f32);
        for slot in &mut self.slots {
            slot.set_position(slot.position() - centroid);
        }
        self.refresh_arcs(None);
    }

    /// Scales slots so the farthest one sits at distance 1 from the origin.
    /// Circle radii shrink by the same factor.
    pub(crate) fn normalize(&mut self) {
        let scale = self
            .slots
            .iter()
            .map(|slot| slot.position().norm())
            .fold(0.0_f32, f32::max);
        if scale < EPSILON {
            return;
        }
        for slot in &mut self.slots {
            slot.set_position(slot.position() * (1.0 / scale));
        }
        self.refresh_arcs(Some(scale));
    }

    fn refresh_arcs(&mut self, scale: Option<f32>) {
        let positions: Vec<Vec2> = self.slots.iter().map(Slot::position).collect();
        let lookup = |slot: usize| positions.get(slot).copied().unwrap_or(Vec2::ZERO);
        for arc in self.arcs.iter_mut().flatten() {
            arc.set_endpoints(lookup(arc.from_slot()), lookup(arc.to_slot()));
            if let Some(scale) = scale {
                arc.normalize(scale);
            }
        }
    }

    /// Applies permutation `index`. Indices past the end are ignored.
    pub fn activate_permutation(&mut self, index: usize, inverted: bool, now_ms: f64) -> bool {
        let (Some(permutation), Some(arcs)) = (self.permutations.get(index), self.arcs.get(index))
        else {
            debug!(
                puzzle = %self.name,
                index,
                count = self.permutations.len(),
                "ignoring out-of-range permutation"
            );
            return false;
        };
        permutation.apply(&mut self.stickers, arcs, inverted, now_ms);
        debug!(
            puzzle = %self.name,
            index,
            inverted,
            color = %permutation.color(),
            cycles = ?permutation.cycles(),
            "applied permutation"
        );
        true
    }

    /// Applies [`RANDOMIZE_MOVES`] random permutations in random directions.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, now_ms: f64) {
        let count = self.permutations.len();
        if count == 0 {
            return;
        }
        for _ in 0..RANDOMIZE_MOVES {
            // Every permutation is eligible, the first one included.
            let index = rng.random_range(0..count);
            let inverted = rng.random_bool(0.5);
            if let (Some(permutation), Some(arcs)) =
                (self.permutations.get(index), self.arcs.get(index))
            {
                permutation.apply(&mut self.stickers, arcs, inverted, now_ms);
            }
        }
        debug!(puzzle = %self.name, moves = RANDOMIZE_MOVES, "randomized");
    }

    /// Recolors every sticker to its current slot's home color.
    pub fn solve(&mut self) {
        for (sticker, slot) in self.stickers.iter_mut().zip(&self.slots) {
            sticker.set_color(slot.home_color());
        }
        debug!(puzzle = %self.name, "solved");
    }

    pub fn is_solved(&self) -> bool {
        self.stickers
            .iter()
            .zip(&self.slots)
            .all(|(sticker, slot)| sticker.color() == slot.home_color())
    }

    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.stickers.iter().any(|sticker| sticker.is_moving(now_ms))
    }

    pub fn sticker_positions(&self, now_ms: f64) -> Vec<Vec2> {
        self.stickers
            .iter()
            .map(|sticker| sticker.current_position(&self.slots, now_ms))
            .collect()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, now_ms: f64) {
        surface.fill_rect(
            Color::BACKGROUND,
            -BACKGROUND_EXTENT,
            -BACKGROUND_EXTENT,
            BACKGROUND_EXTENT * 2.0,
            BACKGROUND_EXTENT * 2.0,
        );
        for (permutation, arcs) in self.permutations.iter().zip(&self.arcs) {
            for arc in arcs.iter().filter(|arc| !arc.is_fixed_point()) {
                let points = arc.sample(ARC_SEGMENTS);
                for pair in points.windows(2) {
                    surface.draw_line(
                        permutation.color(),
                        pair[0].x,
                        pair[0].y,
                        pair[1].x,
                        pair[1].y,
                    );
                }
            }
        }
        for slot in &self.slots {
            let pos = slot.position();
            surface.fill_circle(slot.home_color(), pos.x, pos.y, SLOT_RADIUS);
        }
        for (sticker, pos) in self.stickers.iter().zip(self.sticker_positions(now_ms)) {
            surface.fill_circle(sticker.color(), pos.x, pos.y, STICKER_RADIUS);
        }
        surface.draw_text(
            Color::TEXT,
            &self.name,
            -BACKGROUND_EXTENT + 0.05,
            BACKGROUND_EXTENT - 0.1,
        );
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn color(name: &str) -> Color {
        Color::named(name).unwrap()
    }

    fn triangle() -> PuzzleData {
        let mut puzzle = PuzzleData::new("triangle");
        puzzle.add_slot("a", Vec2::new(0.0, 1.0), color("red"));
        puzzle.add_slot("b", Vec2::new(-1.0, -1.0), color("green"));
        puzzle.add_slot("c", Vec2::new(1.0, -1.0), color("blue"));
        let cycle = Permutation::from_cycles(0, color("yellow"), 3, &[vec![0, 1, 2]]).unwrap();
        puzzle.add_permutation(cycle);
        let swap = Permutation::from_cycles(0, color("purple"), 3, &[vec![1, 2]]).unwrap();
        puzzle.add_permutation(swap);
        puzzle.assign_reverse_indices();
        puzzle
    }

    fn colors(puzzle: &PuzzleData) -> Vec<Color> {
        puzzle.stickers().iter().map(Sticker::color).collect()
    }

    #[test]
    fn registration_assigns_indices_and_line_arcs() {
        let puzzle = triangle();
        assert_eq!(puzzle.permutations()[1].index(), 1);
        assert_eq!(puzzle.permutations()[0].reverse_index(), 1);
        assert_eq!(puzzle.permutations()[1].reverse_index(), 0);
        let arcs = puzzle.arcs(0).unwrap();
        assert_eq!(arcs.len(), 3);
        assert_eq!(arcs[0].to_slot(), 1);
        assert!(matches!(arcs[2].shape(), crate::arc::ArcShape::Line));
    }

    #[test]
    fn get_arc_resolves_inverse_source() {
        let puzzle = triangle();
        assert_eq!(puzzle.get_arc(0, 1, false).map(Arc::from_slot), Some(1));
        assert_eq!(puzzle.get_arc(0, 1, true).map(Arc::from_slot), Some(0));
        assert!(puzzle.get_arc(7, 0, false).is_none());
    }

    #[test]
    fn out_of_range_activation_is_ignored() {
        let mut puzzle = triangle();
        let before = colors(&puzzle);
        assert!(!puzzle.activate_permutation(2, false, 0.0));
        assert_eq!(colors(&puzzle), before);
        assert!(!puzzle.is_animating(0.0));
    }

    #[test]
    fn activate_then_inverse_restores() {
        let mut puzzle = triangle();
        let before = colors(&puzzle);
        assert!(puzzle.activate_permutation(0, false, 0.0));
        assert!(!puzzle.is_solved());
        assert!(puzzle.is_animating(100.0));
        assert!(puzzle.activate_permutation(0, true, 200.0));
        assert_eq!(colors(&puzzle), before);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn fixed_points_keep_their_animation() {
        let mut puzzle = triangle();
        puzzle.activate_permutation(0, false, 0.0);
        let before = puzzle.sticker_positions(300.0);
        // The swap leaves slot 0 alone.
        puzzle.activate_permutation(1, false, 300.0);
        let after = puzzle.sticker_positions(300.0);
        assert_eq!(after[0], before[0]);
        assert_eq!(puzzle.stickers()[0].move_start_ms(), 0.0);
        assert_eq!(puzzle.stickers()[1].move_start_ms(), 300.0);
    }

    #[test]
    fn randomize_draws_from_every_permutation() {
        let mut puzzle = PuzzleData::new("pair");
        let red = color("red");
        puzzle.add_slot("a", Vec2::new(-1.0, 0.0), red);
        puzzle.add_slot("b", Vec2::new(1.0, 0.0), color("blue"));
        let swap = Permutation::from_cycles(0, red, 2, &[vec![0, 1]]).unwrap();
        puzzle.add_permutation(swap);
        let mut rng = StdRng::seed_from_u64(11);
        // With a single permutation only index 0 can move anything.
        puzzle.randomize(&mut rng, 50.0);
        assert!(puzzle.stickers().iter().all(|s| s.move_start_ms() == 50.0));
        assert!(puzzle.is_animating(60.0));
    }

    #[test]
    fn second_activation_restarts_animation() {
        let mut puzzle = triangle();
        puzzle.activate_permutation(0, false, 0.0);
        puzzle.activate_permutation(0, false, 600.0);
        for sticker in puzzle.stickers() {
            assert_eq!(sticker.move_start_ms(), 600.0);
        }
        assert!(puzzle.is_animating(1700.0));
        assert!(!puzzle.is_animating(1800.0));
    }

    #[test]
    fn randomize_then_solve() {
        let mut puzzle = triangle();
        let mut rng = StdRng::seed_from_u64(7);
        puzzle.randomize(&mut rng, 0.0);
        puzzle.solve();
        assert!(puzzle.is_solved());
        for (sticker, slot) in puzzle.stickers().iter().zip(puzzle.slots()) {
            assert_eq!(sticker.color(), slot.home_color());
        }
    }

    #[test]
    fn randomize_without_permutations_is_noop() {
        let mut puzzle = PuzzleData::new("empty");
        puzzle.add_slot("a", Vec2::ZERO, color("red"));
        let mut rng = StdRng::seed_from_u64(1);
        puzzle.randomize(&mut rng, 0.0);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn recenter_and_normalize_move_arcs_too() {
        let mut puzzle = PuzzleData::new("offset");
        puzzle.add_slot("a", Vec2::new(10.0, 10.0), color("red"));
        puzzle.add_slot("b", Vec2::new(14.0, 10.0), color("blue"));
        puzzle.add_permutation(
            Permutation::from_cycles(0, color("red"), 2, &[vec![0, 1]]).unwrap(),
        );
        puzzle.recenter();
        puzzle.normalize();
        assert!(puzzle.slots()[0].position().distance(Vec2::new(-1.0, 0.0)) < 1e-5);
        assert!(puzzle.slots()[1].position().distance(Vec2::new(1.0, 0.0)) < 1e-5);
        let (u, v) = puzzle.arcs(0).unwrap()[0].endpoints();
        assert!(u.distance(Vec2::new(-1.0, 0.0)) < 1e-5);
        assert!(v.distance(Vec2::new(1.0, 0.0)) < 1e-5);
    }

    #[test]
    fn draw_emits_slots_stickers_and_name() {
        let puzzle = triangle();
        let mut surface = RecordingSurface::new();
        puzzle.draw(&mut surface, 0.0);
        assert!(matches!(surface.commands.first(), Some(DrawCommand::Rect { .. })));
        assert_eq!(surface.circles().count(), 6);
        let lines = surface
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count();
        // Three moving arcs for the 3-cycle, two for the swap.
        assert_eq!(lines, 5 * ARC_SEGMENTS);
        assert!(matches!(
            surface.commands.last(),
            Some(DrawCommand::Text { text, .. }) if text == "triangle"
        ));
    }

    #[test]
    fn draw_does_not_mutate() {
        let mut puzzle = triangle();
        puzzle.activate_permutation(1, false, 0.0);
        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        puzzle.draw(&mut first, 300.0);
        puzzle.draw(&mut second, 300.0);
        assert_eq!(first.commands, second.commands);
    }
}
