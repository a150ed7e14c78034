use crate::arc::Arc;
use crate::color::Color;
use crate::slot::Slot;
use crate::vector::Vec2;

pub const MOVE_DURATION_MS: f64 = 1200.0;

/// A colored marker. Where it sits is decided by its position in the
/// puzzle's sticker list; `slot` mirrors that index for position lookups.
#[derive(Clone, Debug, PartialEq)]
pub struct Sticker {
    color: Color,
    slot: usize,
    arc: Option<Arc>,
    inverted: bool,
    move_start_ms: f64,
}

impl Sticker {
    pub fn new(color: Color, slot: usize) -> Self {
        Self {
            color,
            slot,
            arc: None,
            inverted: false,
            move_start_ms: 0.0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn arc(&self) -> Option<&Arc> {
        self.arc.as_ref()
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn move_start_ms(&self) -> f64 {
        self.move_start_ms
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Places the sticker on `slot` and restarts its animation along `arc`.
    pub(crate) fn start_move(&mut self, slot: usize, arc: Arc, inverted: bool, now_ms: f64) {
        self.slot = slot;
        self.arc = Some(arc);
        self.inverted = inverted;
        self.move_start_ms = now_ms;
    }

    /// Places the sticker on `slot` without animating.
    pub(crate) fn settle(&mut self, slot: usize) {
        self.slot = slot;
        self.arc = None;
        self.inverted = false;
    }

    pub fn time_ratio(&self, now_ms: f64) -> f32 {
        if self.arc.is_none() {
            return 1.0;
        }
        ((now_ms - self.move_start_ms) / MOVE_DURATION_MS).clamp(0.0, 1.0) as f32
    }

    pub fn is_moving(&self, now_ms: f64) -> bool {
        self.time_ratio(now_ms) < 1.0
    }

    pub fn current_position(&self, slots: &[Slot], now_ms: f64) -> Vec2 {
        let home = slots
            .get(self.slot)
            .map(Slot::position)
            .unwrap_or(Vec2::ZERO);
        let Some(arc) = self.arc.as_ref() else {
            return home;
        };
        let ratio = self.time_ratio(now_ms);
        if ratio >= 1.0 {
            return home;
        }
        let t = if self.inverted { 1.0 - ratio } else { ratio };
        arc.point(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> Vec<Slot> {
        let red = Color::named("red").unwrap();
        vec![
            Slot::new("a", Vec2::new(-1.0, 0.0), red),
            Slot::new("b", Vec2::new(1.0, 0.0), red),
        ]
    }

    fn moving(inverted: bool) -> (Vec<Slot>, Sticker) {
        let slots = slots();
        let arc = Arc::line(0, 0, 1, slots[0].position(), slots[1].position());
        let mut sticker = Sticker::new(Color::named("blue").unwrap(), 0);
        let target = if inverted { 0 } else { 1 };
        sticker.start_move(target, arc, inverted, 1000.0);
        (slots, sticker)
    }

    #[test]
    fn idle_sticker_sits_on_its_slot() {
        let slots = slots();
        let sticker = Sticker::new(Color::named("blue").unwrap(), 1);
        assert_eq!(sticker.time_ratio(0.0), 1.0);
        assert_eq!(sticker.current_position(&slots, 0.0), slots[1].position());
    }

    #[test]
    fn time_ratio_is_clamped() {
        let (_, sticker) = moving(false);
        assert_eq!(sticker.time_ratio(0.0), 0.0);
        assert_eq!(sticker.time_ratio(1000.0), 0.0);
        assert!((sticker.time_ratio(1600.0) - 0.5).abs() < 1e-6);
        assert_eq!(sticker.time_ratio(1000.0 + MOVE_DURATION_MS), 1.0);
        assert_eq!(sticker.time_ratio(1e9), 1.0);
    }

    #[test]
    fn forward_move_starts_at_arc_start() {
        let (slots, sticker) = moving(false);
        assert_eq!(sticker.current_position(&slots, 1000.0), Vec2::new(-1.0, 0.0));
        let mid = sticker.current_position(&slots, 1600.0);
        assert!(mid.distance(Vec2::ZERO) < 1e-5);
        assert_eq!(sticker.current_position(&slots, 5000.0), slots[1].position());
    }

    #[test]
    fn inverted_move_runs_backwards() {
        let (slots, sticker) = moving(true);
        assert_eq!(sticker.current_position(&slots, 1000.0), Vec2::new(1.0, 0.0));
        assert_eq!(sticker.current_position(&slots, 5000.0), slots[0].position());
    }

    #[test]
    fn positions_are_idempotent() {
        let (slots, sticker) = moving(false);
        let first = sticker.current_position(&slots, 1300.0);
        let second = sticker.current_position(&slots, 1300.0);
        assert_eq!(first, second);
        assert!(sticker.is_moving(1300.0));
        assert!(!sticker.is_moving(2200.0));
    }
}
