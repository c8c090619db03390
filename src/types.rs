//! Geometry and color primitives shared by layout and rendering

use serde::{Deserialize, Serialize};

/// Rectangle with bottom-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from its top edge, the way layout code thinks about boxes
    pub fn from_top(x: f64, top: f64, width: f64, height: f64) -> Self {
        Self { x, y: top - height, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn bottom(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Size with width and height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A4 portrait in points
    pub fn a4() -> Self {
        Self { width: 595.0, height: 842.0 }
    }
}

/// RGB color, components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("Invalid hex color: {}", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| format!("Invalid hex color: {}", hex))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Mix towards white; `amount` 0.0 keeps the color, 1.0 yields white
    pub fn tint(self, amount: f64) -> Self {
        let a = amount.clamp(0.0, 1.0);
        Self::rgb(
            self.r + (1.0 - self.r) * a,
            self.g + (1.0 - self.g) * a,
            self.b + (1.0 - self.b) * a,
        )
    }
}
