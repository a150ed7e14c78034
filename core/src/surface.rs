use crate::color::Color;

/// Drawing target in puzzle-local coordinates, roughly `[-1, 1]` on both
/// axes. Mapping to pixels is the implementor's job.
pub trait Surface {
    fn fill_circle(&mut self, color: Color, x: f32, y: f32, r: f32);
    fn draw_line(&mut self, color: Color, x1: f32, y1: f32, x2: f32, y2: f32);
    fn fill_rect(&mut self, color: Color, x: f32, y: f32, w: f32, h: f32);
    fn draw_text(&mut self, color: Color, text: &str, x: f32, y: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Circle {
        color: Color,
        x: f32,
        y: f32,
        r: f32,
    },
    Line {
        color: Color,
        from: (f32, f32),
        to: (f32, f32),
    },
    Rect {
        color: Color,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Text {
        color: Color,
        text: String,
        x: f32,
        y: f32,
    },
}

/// Keeps every call in order. Used headless and in tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn fill_circle(&mut self, color: Color, x: f32, y: f32, r: f32) {
        self.commands.push(DrawCommand::Circle { color, x, y, r });
    }

    fn draw_line(&mut self, color: Color, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line {
            color,
            from: (x1, y1),
            to: (x2, y2),
        });
    }

    fn fill_rect(&mut self, color: Color, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Rect { color, x, y, w, h });
    }

    fn draw_text(&mut self, color: Color, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text {
            color,
            text: text.to_string(),
            x,
            y,
        });
    }
}
