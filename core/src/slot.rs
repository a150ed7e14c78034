use crate::color::Color;
use crate::vector::Vec2;

/// A fixed node in the puzzle graph. Its identity is its index in
/// [`crate::PuzzleData::slots`].
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    id: String,
    position: Vec2,
    home_color: Color,
}

impl Slot {
    pub fn new(id: impl Into<String>, position: Vec2, home_color: Color) -> Self {
        Self {
            id: id.into(),
            position,
            home_color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn home_color(&self) -> Color {
        self.home_color
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}
