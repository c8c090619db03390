//! Report configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::font_registry::FontFamily;
use crate::types::{Color, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Sv,
    En,
}

/// Page geometry and flow thresholds, in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Height of the running header band on body pages
    pub header_height: f64,
    /// Distance from the page top to the first line of body content
    pub content_top_offset: f64,
    /// Content must not go below this y
    pub bottom_margin: f64,
    pub footer_baseline: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin_left: 50.0,
            margin_right: 50.0,
            header_height: 36.0,
            content_top_offset: 90.0,
            bottom_margin: 100.0,
            footer_baseline: 30.0,
        }
    }
}

impl LayoutConfig {
    pub fn page_size(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Cursor position right after the header band
    pub fn content_top(&self) -> f64 {
        self.page_height - self.content_top_offset
    }

    fn validate(&self) -> ReportResult<()> {
        if self.content_width() < 200.0 {
            return Err(ReportError::Config(format!(
                "content width {:.0}pt is too narrow",
                self.content_width()
            )));
        }
        if self.content_top_offset < self.header_height {
            return Err(ReportError::Config(
                "content_top_offset must clear the header band".to_string(),
            ));
        }
        if self.content_top() - self.bottom_margin < 200.0 {
            return Err(ReportError::Config(
                "page leaves less than 200pt for content".to_string(),
            ));
        }
        if self.footer_baseline >= self.bottom_margin {
            return Err(ReportError::Config(
                "footer_baseline must lie below bottom_margin".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hex colors as written in config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub light_gray: String,
    pub medium_gray: String,
    pub cover_band: String,
    pub success: String,
    pub warning: String,
    pub danger: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            primary: "#16475b".to_string(),
            secondary: "#7edcff".to_string(),
            text: "#1a1a1a".to_string(),
            light_gray: "#f2f2f2".to_string(),
            medium_gray: "#999999".to_string(),
            cover_band: "#04111d".to_string(),
            success: "#22a35a".to_string(),
            warning: "#f59e0b".to_string(),
            danger: "#dc2626".to_string(),
        }
    }
}

/// Resolved palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub light_gray: Color,
    pub medium_gray: Color,
    pub cover_band: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl PaletteConfig {
    pub fn resolve(&self) -> ReportResult<Palette> {
        let parse = |name: &str, hex: &str| {
            Color::from_hex(hex).map_err(|e| ReportError::Config(format!("palette.{}: {}", name, e)))
        };
        Ok(Palette {
            primary: parse("primary", &self.primary)?,
            secondary: parse("secondary", &self.secondary)?,
            text: parse("text", &self.text)?,
            light_gray: parse("light_gray", &self.light_gray)?,
            medium_gray: parse("medium_gray", &self.medium_gray)?,
            cover_band: parse("cover_band", &self.cover_band)?,
            success: parse("success", &self.success)?,
            warning: parse("warning", &self.warning)?,
            danger: parse("danger", &self.danger)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub locale: Locale,
    pub font_family: String,
    /// Flate-compress content streams
    pub compress: bool,
    /// Overrides the document title
    pub title: Option<String>,
    pub layout: LayoutConfig,
    pub palette: PaletteConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Sv,
            font_family: "Helvetica".to_string(),
            compress: true,
            title: None,
            layout: LayoutConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> ReportResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ReportResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check layout and palette values
    ///
    /// The font family is checked separately when fonts are registered,
    /// since a bad family is a font error rather than a config error.
    pub fn validate(&self) -> ReportResult<()> {
        self.layout.validate()?;
        self.palette.resolve()?;
        Ok(())
    }

    pub fn font_family(&self) -> ReportResult<FontFamily> {
        self.font_family.parse()
    }
}
