//! Font registry for the standard Type1 families used by the report
//!
//! Fonts are never embedded as files. Each variant is registered as a
//! built-in Type1 font with WinAnsiEncoding and exposed to content streams
//! under a fixed resource name (`F1` regular, `F2` bold, `F3` oblique).

use std::str::FromStr;

use pdf_writer::writers::Resources;
use pdf_writer::{Name, Pdf, Ref};

use crate::error::{ReportError, ReportResult};
use crate::font_metrics::{metrics_for, FontMetrics};
use crate::text_encoding::unicode_to_winansi;

/// Supported standard font families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Helvetica,
    Courier,
}

impl FromStr for FontFamily {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Helvetica" | "Arial" => Ok(FontFamily::Helvetica),
            "Courier" => Ok(FontFamily::Courier),
            other => Err(ReportError::Font(format!(
                "unsupported font family '{}' (expected Helvetica or Courier)",
                other
            ))),
        }
    }
}

/// Style variant inside a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

impl FontStyle {
    fn resource_name(self) -> Name<'static> {
        match self {
            FontStyle::Regular => Name(b"F1"),
            FontStyle::Bold => Name(b"F2"),
            FontStyle::Oblique => Name(b"F3"),
        }
    }
}

/// Identifies one concrete font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontId {
    pub family: FontFamily,
    pub style: FontStyle,
}

impl FontId {
    pub fn new(family: FontFamily, style: FontStyle) -> Self {
        Self { family, style }
    }

    pub fn base_font(&self) -> &'static str {
        match (self.family, self.style) {
            (FontFamily::Helvetica, FontStyle::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontStyle::Bold) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontStyle::Oblique) => "Helvetica-Oblique",
            (FontFamily::Courier, FontStyle::Regular) => "Courier",
            (FontFamily::Courier, FontStyle::Bold) => "Courier-Bold",
            (FontFamily::Courier, FontStyle::Oblique) => "Courier-Oblique",
        }
    }
}

/// A registered font: resource name plus metrics
#[derive(Debug, Clone, Copy)]
pub struct FontHandle {
    pub id: FontId,
    pub resource: Name<'static>,
    metrics: &'static FontMetrics,
}

impl FontHandle {
    /// Width of `text` at `size` points
    pub fn width_of(&self, text: &str, size: f64) -> f64 {
        let units = self.metrics.advance_sum(&unicode_to_winansi(text));
        units as f64 * size / 1000.0
    }

    /// Height above the baseline of capital letters at `size`
    pub fn cap_height(&self, size: f64) -> f64 {
        self.metrics.cap_height * size / 1000.0
    }

    pub fn ascent(&self, size: f64) -> f64 {
        self.metrics.ascent * size / 1000.0
    }

    /// Positive distance below the baseline
    pub fn descent(&self, size: f64) -> f64 {
        -self.metrics.descent * size / 1000.0
    }
}

/// Free function form used by layout code
pub fn width_of(text: &str, font: &FontHandle, size: f64) -> f64 {
    font.width_of(text, size)
}

/// The three variants every report needs
#[derive(Debug, Clone, Copy)]
pub struct FontSet {
    pub regular: FontHandle,
    pub bold: FontHandle,
    pub oblique: FontHandle,
}

impl FontSet {
    pub fn get(&self, style: FontStyle) -> &FontHandle {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Oblique => &self.oblique,
        }
    }

    pub fn family(&self) -> FontFamily {
        self.regular.id.family
    }
}

/// Tracks which fonts a document uses and writes their dictionaries
pub struct FontRegistry {
    family: FontFamily,
    fonts: Vec<FontHandle>,
}

impl FontRegistry {
    pub fn new(family: FontFamily) -> Self {
        Self {
            family,
            fonts: Vec::new(),
        }
    }

    /// Build a registry from a configured family name
    pub fn for_family_name(name: &str) -> ReportResult<Self> {
        Ok(Self::new(name.parse()?))
    }

    /// Register a font and return its handle
    pub fn embed(&mut self, id: FontId) -> ReportResult<FontHandle> {
        if let Some(existing) = self.fonts.iter().find(|f| f.id == id) {
            return Ok(*existing);
        }

        let metrics = metrics_for(id.base_font()).ok_or_else(|| {
            ReportError::Font(format!("no metrics available for {}", id.base_font()))
        })?;
        let handle = FontHandle {
            id,
            resource: id.style.resource_name(),
            metrics,
        };
        self.fonts.push(handle);
        Ok(handle)
    }

    /// Register regular, bold and oblique variants of the registry's family
    pub fn embed_set(&mut self) -> ReportResult<FontSet> {
        Ok(FontSet {
            regular: self.embed(FontId::new(self.family, FontStyle::Regular))?,
            bold: self.embed(FontId::new(self.family, FontStyle::Bold))?,
            oblique: self.embed(FontId::new(self.family, FontStyle::Oblique))?,
        })
    }

    /// Write Type1 font dictionaries, returning (resource name, object id) pairs
    pub fn write_fonts(
        &self,
        pdf: &mut Pdf,
        mut next_ref: impl FnMut() -> Ref,
    ) -> Vec<(Name<'static>, Ref)> {
        self.fonts
            .iter()
            .map(|font| {
                let id = next_ref();
                pdf.type1_font(id)
                    .base_font(Name(font.id.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                (font.resource, id)
            })
            .collect()
    }

    /// Add the font entries to a page resource dictionary
    pub fn write_resources(resources: &mut Resources, written: &[(Name<'static>, Ref)]) {
        let mut fonts = resources.fonts();
        for (name, id) in written {
            fonts.pair(*name, *id);
        }
    }
}
