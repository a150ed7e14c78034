pub mod action;
pub mod arc;
pub mod builder;
pub mod catalog;
pub mod color;
pub mod permutation;
pub mod puzzle;
pub mod slot;
pub mod state;
pub mod sticker;
pub mod surface;
pub mod vector;

pub use action::PuzzleAction;
pub use arc::{Arc, ArcShape, CircleArc, CircleParams};
pub use builder::{BuildError, PuzzleBuilder};
pub use catalog::{Catalog, CatalogError, PuzzleDefinition, DEFAULT_PUZZLE_SLUG};
pub use color::Color;
pub use permutation::{Permutation, PermutationError};
pub use puzzle::PuzzleData;
pub use slot::Slot;
pub use state::CoreState;
pub use sticker::{Sticker, MOVE_DURATION_MS};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use vector::Vec2;
