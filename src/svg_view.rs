use std::fmt::Write;

use kurukuru_core::puzzle::BACKGROUND_EXTENT;
use kurukuru_core::{Color, Surface};

const LINE_WIDTH_PX: f32 = 2.0;
const FONT_SIZE_RATIO: f32 = 0.04;

/// Collects draw calls into an SVG document. Puzzle space spans
/// `[-BACKGROUND_EXTENT, BACKGROUND_EXTENT]` with y pointing up; the canvas
/// is square with y pointing down.
pub(crate) struct SvgSurface {
    size_px: f32,
    body: String,
}

impl SvgSurface {
    pub(crate) fn new(size_px: u32) -> Self {
        Self {
            size_px: size_px as f32,
            body: String::new(),
        }
    }

    fn scale(&self) -> f32 {
        self.size_px / (BACKGROUND_EXTENT * 2.0)
    }

    pub(crate) fn to_px(&self, x: f32, y: f32) -> (f32, f32) {
        let scale = self.scale();
        (
            (x + BACKGROUND_EXTENT) * scale,
            (BACKGROUND_EXTENT - y) * scale,
        )
    }

    pub(crate) fn finish(self) -> String {
        let size = self.size_px;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">\n{}</svg>\n",
            self.body
        )
    }
}

impl Surface for SvgSurface {
    fn fill_circle(&mut self, color: Color, x: f32, y: f32, r: f32) {
        let (cx, cy) = self.to_px(x, y);
        let r = r * self.scale();
        let _ = writeln!(
            self.body,
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{}\"/>",
            color.to_css()
        );
    }

    fn draw_line(&mut self, color: Color, x1: f32, y1: f32, x2: f32, y2: f32) {
        let (ax, ay) = self.to_px(x1, y1);
        let (bx, by) = self.to_px(x2, y2);
        let _ = writeln!(
            self.body,
            "<line x1=\"{ax:.2}\" y1=\"{ay:.2}\" x2=\"{bx:.2}\" y2=\"{by:.2}\" stroke=\"{}\" stroke-width=\"{LINE_WIDTH_PX}\" stroke-linecap=\"round\"/>",
            color.to_css()
        );
    }

    fn fill_rect(&mut self, color: Color, x: f32, y: f32, w: f32, h: f32) {
        // (x, y) is the lower-left corner in puzzle space.
        let (px, py) = self.to_px(x, y + h);
        let scale = self.scale();
        let _ = writeln!(
            self.body,
            "<rect x=\"{px:.2}\" y=\"{py:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            w * scale,
            h * scale,
            color.to_css()
        );
    }

    fn draw_text(&mut self, color: Color, text: &str, x: f32, y: f32) {
        let (px, py) = self.to_px(x, y);
        let font_px = self.size_px * FONT_SIZE_RATIO;
        let _ = writeln!(
            self.body,
            "<text x=\"{px:.2}\" y=\"{py:.2}\" font-family=\"sans-serif\" font-size=\"{font_px:.1}\" fill=\"{}\">{}</text>",
            color.to_css(),
            escape_text(text)
        );
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
