//! Recording canvas
//!
//! A `Page` is a display list of primitive draw operations in absolute,
//! bottom-left-origin coordinates. Layout code records onto pages; the
//! serializer replays them onto PDF content streams. Pages carry no
//! layout state of their own.

use crate::font_registry::FontStyle;
use crate::types::{Color, Rect, Size};

/// Fill/stroke/opacity of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
    pub opacity: f64,
}

impl ShapeStyle {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 1.0,
            opacity: 1.0,
        }
    }

    pub fn stroked(color: Color, line_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: Option<f64>) -> Self {
        self.opacity = opacity.unwrap_or(1.0).clamp(0.0, 1.0);
        self
    }
}

/// A single run of text at a baseline position
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub style: FontStyle,
    pub color: Color,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        style: ShapeStyle,
    },
    RoundRect {
        rect: Rect,
        radius: f64,
        style: ShapeStyle,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        width: f64,
        opacity: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: ShapeStyle,
    },
    Text(TextOp),
    /// Image registered on the laid-out report, referenced by index
    Image {
        image: usize,
        rect: Rect,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Cover,
    Body,
}

/// One page of the document
#[derive(Debug, Clone)]
pub struct Page {
    pub size: Size,
    pub kind: PageKind,
    pub ops: Vec<DrawOp>,
    /// Printed page number, assigned once during finalization
    pub number: Option<u32>,
}

impl Page {
    pub fn new(size: Size, kind: PageKind) -> Self {
        Self {
            size,
            kind,
            ops: Vec::new(),
            number: None,
        }
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color, opacity: Option<f64>) {
        self.ops.push(DrawOp::Rect {
            rect,
            style: ShapeStyle::filled(color).with_opacity(opacity),
        });
    }

    pub fn draw_round_rect(&mut self, rect: Rect, radius: f64, color: Color, opacity: Option<f64>) {
        self.ops.push(DrawOp::RoundRect {
            rect,
            radius,
            style: ShapeStyle::filled(color).with_opacity(opacity),
        });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.ops.push(DrawOp::Rect {
            rect,
            style: ShapeStyle::stroked(color, line_width),
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        size: f64,
        style: FontStyle,
        color: Color,
        opacity: Option<f64>,
    ) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text(TextOp {
            text: text.to_string(),
            x,
            y,
            size,
            style,
            color,
            opacity: opacity.unwrap_or(1.0).clamp(0.0, 1.0),
        }));
    }

    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width,
            opacity: 1.0,
        });
    }

    pub fn draw_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color, opacity: Option<f64>) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            r,
            style: ShapeStyle::filled(color).with_opacity(opacity),
        });
    }

    /// Circle outline of the given stroke width
    pub fn draw_ring(&mut self, cx: f64, cy: f64, r: f64, color: Color, line_width: f64) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            r,
            style: ShapeStyle::stroked(color, line_width),
        });
    }

    pub fn draw_image(&mut self, image: usize, rect: Rect) {
        self.ops.push(DrawOp::Image { image, rect });
    }

    /// All text runs on the page in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.text.contains(needle))
    }

    /// Distinct opacities below 1.0 used on this page
    pub fn opacities(&self) -> impl Iterator<Item = f64> + '_ {
        self.ops.iter().filter_map(|op| {
            let opacity = match op {
                DrawOp::Rect { style, .. }
                | DrawOp::RoundRect { style, .. }
                | DrawOp::Circle { style, .. } => style.opacity,
                DrawOp::Line { opacity, .. } => *opacity,
                DrawOp::Text(t) => t.opacity,
                DrawOp::Image { .. } => 1.0,
            };
            (opacity < 1.0).then_some(opacity)
        })
    }
}
