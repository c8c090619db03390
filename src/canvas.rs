//! Canvas-like API over a pdf-writer content stream
//!
//! Coordinates are PDF user space (points, origin bottom-left). The canvas
//! keeps a small state stack mirroring `q`/`Q` so callers can scope color
//! and opacity changes.

use pdf_writer::{Content, Name, Str};

use crate::text_encoding::unicode_to_winansi;
use crate::types::{Color, Rect};

/// Bezier control distance for a quarter circle of radius 1
const KAPPA: f64 = 0.552_284_75;

#[derive(Clone)]
pub struct CanvasState {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub line_width: f64,
    pub font_name: Name<'static>,
    pub font_size: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            fill_color: Color::black(),
            stroke_color: Color::black(),
            line_width: 1.0,
            font_name: Name(b"F1"),
            font_size: 12.0,
        }
    }
}

pub struct PdfCanvas {
    content: Content,
    state: CanvasState,
    state_stack: Vec<CanvasState>,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            state: CanvasState::default(),
            state_stack: Vec::new(),
        }
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    /// Finished content stream bytes
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    // ===== State Management =====

    pub fn save_state(&mut self) {
        self.state_stack.push(self.state.clone());
        self.content.save_state();
    }

    pub fn restore_state(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
            self.content.restore_state();
        }
    }

    // ===== Colors =====

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
        self.content
            .set_fill_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
        self.content
            .set_stroke_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    /// Select a named ExtGState from the page resources (used for opacity)
    pub fn set_graphics_state(&mut self, name: &str) {
        self.content.set_parameters(Name(name.as_bytes()));
    }

    // ===== Drawing =====

    fn paint(&mut self, fill: bool, stroke: bool) {
        match (fill, stroke) {
            (true, true) => {
                self.content.fill_nonzero_and_stroke();
            }
            (true, false) => {
                self.content.fill_nonzero();
            }
            (false, true) => {
                self.content.stroke();
            }
            (false, false) => {
                self.content.end_path();
            }
        }
    }

    pub fn rect(&mut self, rect: Rect, fill: bool, stroke: bool) {
        self.content.rect(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        );
        self.paint(fill, stroke);
    }

    pub fn round_rect(&mut self, rect: Rect, radius: f64, fill: bool, stroke: bool) {
        // Clamp radius to half of the smaller dimension
        let r = radius.min(rect.width.min(rect.height) / 2.0).max(0.0);
        if r <= 0.0 {
            self.rect(rect, fill, stroke);
            return;
        }

        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        let c = r * KAPPA;
        let p = |v: f64| v as f32;

        self.content.move_to(p(x + r), p(y + h));
        self.content.line_to(p(x + w - r), p(y + h));
        self.content.cubic_to(
            p(x + w - r + c),
            p(y + h),
            p(x + w),
            p(y + h - r + c),
            p(x + w),
            p(y + h - r),
        );
        self.content.line_to(p(x + w), p(y + r));
        self.content.cubic_to(
            p(x + w),
            p(y + r - c),
            p(x + w - r + c),
            p(y),
            p(x + w - r),
            p(y),
        );
        self.content.line_to(p(x + r), p(y));
        self.content
            .cubic_to(p(x + r - c), p(y), p(x), p(y + r - c), p(x), p(y + r));
        self.content.line_to(p(x), p(y + h - r));
        self.content.cubic_to(
            p(x),
            p(y + h - r + c),
            p(x + r - c),
            p(y + h),
            p(x + r),
            p(y + h),
        );
        self.content.close_path();
        self.paint(fill, stroke);
    }

    /// Circle from four Bezier quarter arcs
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: bool, stroke: bool) {
        let k = r * KAPPA;
        let p = |v: f64| v as f32;
        self.content.move_to(p(cx + r), p(cy));
        self.content
            .cubic_to(p(cx + r), p(cy + k), p(cx + k), p(cy + r), p(cx), p(cy + r));
        self.content
            .cubic_to(p(cx - k), p(cy + r), p(cx - r), p(cy + k), p(cx - r), p(cy));
        self.content
            .cubic_to(p(cx - r), p(cy - k), p(cx - k), p(cy - r), p(cx), p(cy - r));
        self.content
            .cubic_to(p(cx + k), p(cy - r), p(cx + r), p(cy - k), p(cx + r), p(cy));
        self.content.close_path();
        self.paint(fill, stroke);
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.content.move_to(x1 as f32, y1 as f32);
        self.content.line_to(x2 as f32, y2 as f32);
        self.content.stroke();
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
        self.content.set_line_width(width as f32);
    }

    // ===== Text =====

    pub fn set_font(&mut self, font_name: Name<'static>, size: f64) {
        self.state.font_name = font_name;
        self.state.font_size = size;
    }

    /// Show `text` with its baseline starting at (x, y)
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str) {
        let bytes = unicode_to_winansi(text);
        self.content.begin_text();
        self.content
            .set_font(self.state.font_name, self.state.font_size as f32);
        self.content.next_line(x as f32, y as f32);
        self.content.show(Str(&bytes));
        self.content.end_text();
    }

    // ===== Images =====

    /// Paint an image XObject into the box with bottom-left corner (x, y)
    pub fn draw_image(&mut self, image_name: &str, x: f64, y: f64, width: f64, height: f64) {
        self.content.save_state();
        self.content
            .transform([width as f32, 0.0, 0.0, height as f32, x as f32, y as f32]);
        self.content.x_object(Name(image_name.as_bytes()));
        self.content.restore_state();
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(canvas: PdfCanvas) -> String {
        String::from_utf8_lossy(&canvas.finish()).into_owned()
    }

    #[test]
    fn test_rect_fill_and_stroke() {
        let mut canvas = PdfCanvas::new();
        canvas.set_fill_color(Color::rgb(1.0, 0.0, 0.0));
        canvas.rect(Rect::new(10.0, 20.0, 30.0, 40.0), true, true);
        let out = ops(canvas);
        assert!(out.contains("1 0 0 rg"));
        assert!(out.contains("10 20 30 40 re"));
        assert!(out.contains("\nB"));
    }

    #[test]
    fn test_round_rect_falls_back_to_rect() {
        let mut canvas = PdfCanvas::new();
        canvas.round_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, true, false);
        let out = ops(canvas);
        assert!(out.contains("re"));
        assert!(!out.contains(" c\n"));
    }

    #[test]
    fn test_circle_uses_four_curves() {
        let mut canvas = PdfCanvas::new();
        canvas.circle(50.0, 50.0, 10.0, true, false);
        let out = ops(canvas);
        assert_eq!(out.matches(" c\n").count(), 4);
    }

    #[test]
    fn test_state_stack_restores_colors() {
        let mut canvas = PdfCanvas::new();
        canvas.save_state();
        canvas.set_fill_color(Color::white());
        assert_eq!(canvas.state().fill_color, Color::white());
        canvas.restore_state();
        assert_eq!(canvas.state().fill_color, Color::black());
        // unbalanced restore is ignored
        canvas.restore_state();
        let out = ops(canvas);
        assert_eq!(out.matches('Q').count(), 1);
    }

    #[test]
    fn test_text_and_opacity() {
        let mut canvas = PdfCanvas::new();
        canvas.set_graphics_state("GS50");
        canvas.set_font(Name(b"F2"), 11.0);
        canvas.draw_string(50.0, 700.0, "Hej");
        let out = ops(canvas);
        assert!(out.contains("/GS50 gs"));
        assert!(out.contains("/F2 11 Tf"));
        assert!(out.contains("(Hej) Tj"));
    }
}
