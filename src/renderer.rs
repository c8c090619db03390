//! PDF serialization of laid-out pages
//!
//! Object layout: catalog and page tree first, then the font dictionaries,
//! one ExtGState per distinct opacity, image XObjects, and finally one
//! content stream plus page object per page. Every page shares the same
//! resource dictionary.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use log::info;
use pdf_writer::{Date, Filter, Finish, Name, Pdf, Rect as PdfRect, Ref, TextStr};

use crate::assembler::LaidOutReport;
use crate::canvas::PdfCanvas;
use crate::error::{ReportError, ReportResult};
use crate::font_registry::{FontRegistry, FontSet};
use crate::image_registry::{deflate, image_resource_name};
use crate::page::{DrawOp, Page, ShapeStyle};

const PRODUCER: &str = concat!("investor_report_pdf ", env!("CARGO_PKG_VERSION"));

/// Sequential indirect object ids
struct RefAlloc {
    next: i32,
}

impl RefAlloc {
    fn next(&mut self) -> Ref {
        let id = Ref::new(self.next);
        self.next += 1;
        id
    }
}

/// Opacity as a whole percentage, the key of its ExtGState
fn opacity_key(opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn graphics_state_name(key: u8) -> String {
    format!("GS{}", key)
}

/// Resource names a page's draw operations refer to
struct ResourceNames<'a> {
    fonts: &'a FontSet,
    opacities: BTreeMap<u8, String>,
    images: Vec<String>,
}

impl ResourceNames<'_> {
    fn graphics_state(&self, opacity: f64) -> Option<&str> {
        let key = opacity_key(opacity);
        if key >= 100 {
            return None;
        }
        self.opacities.get(&key).map(String::as_str)
    }
}

pub struct PdfRenderer {
    pdf: Pdf,
    refs: RefAlloc,
    compress: bool,
}

impl PdfRenderer {
    pub fn new(compress: bool) -> Self {
        Self {
            pdf: Pdf::new(),
            refs: RefAlloc { next: 1 },
            compress,
        }
    }

    /// Serialize the whole document
    pub fn render(mut self, report: &LaidOutReport) -> ReportResult<Vec<u8>> {
        if report.pages.is_empty() {
            return Err(ReportError::Serialization("document has no pages".into()));
        }
        let catalog_id = self.refs.next();
        let page_tree_id = self.refs.next();
        self.pdf.catalog(catalog_id).pages(page_tree_id);

        let refs = &mut self.refs;
        let fonts = report.registry.write_fonts(&mut self.pdf, || refs.next());
        let states = self.write_graphics_states(&report.pages);
        let images = self.write_images(report)?;

        let names = ResourceNames {
            fonts: &report.fonts,
            opacities: states.iter().map(|(key, (name, _))| (*key, name.clone())).collect(),
            images: images.iter().map(|(name, _)| name.clone()).collect(),
        };

        let mut page_ids = Vec::with_capacity(report.pages.len());
        for page in &report.pages {
            let page_id = self.refs.next();
            let content_id = self.refs.next();
            let content = paint_page(page, &names)?;
            self.write_content(content_id, &content)?;

            let mut pdf_page = self.pdf.page(page_id);
            pdf_page
                .media_box(PdfRect::new(
                    0.0,
                    0.0,
                    page.size.width as f32,
                    page.size.height as f32,
                ))
                .parent(page_tree_id)
                .contents(content_id);
            {
                let mut resources = pdf_page.resources();
                FontRegistry::write_resources(&mut resources, &fonts);
                if !states.is_empty() {
                    let mut dict = resources.ext_g_states();
                    for (name, id) in states.values() {
                        dict.pair(Name(name.as_bytes()), *id);
                    }
                }
                if !images.is_empty() {
                    let mut dict = resources.x_objects();
                    for (name, id) in &images {
                        dict.pair(Name(name.as_bytes()), *id);
                    }
                }
            }
            pdf_page.finish();
            page_ids.push(page_id);
        }

        self.pdf
            .pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        let info_id = self.refs.next();
        let date = Date::new(report.date.year().clamp(0, 9999) as u16)
            .month(report.date.month() as u8)
            .day(report.date.day() as u8);
        self.pdf
            .document_info(info_id)
            .title(TextStr(&report.title))
            .author(TextStr(&report.company))
            .creator(TextStr(PRODUCER))
            .producer(TextStr(PRODUCER))
            .creation_date(date);

        let bytes = self.pdf.finish();
        info!(
            "PDF generated: {} pages, {} bytes ({:.2} MB)",
            page_ids.len(),
            bytes.len(),
            bytes.len() as f64 / 1_048_576.0
        );
        Ok(bytes)
    }

    /// One ExtGState per distinct opacity below 1.0, keyed by percentage
    fn write_graphics_states(&mut self, pages: &[Page]) -> BTreeMap<u8, (String, Ref)> {
        let keys: BTreeSet<u8> = pages
            .iter()
            .flat_map(Page::opacities)
            .map(opacity_key)
            .filter(|&key| key < 100)
            .collect();

        keys.into_iter()
            .map(|key| {
                let id = self.refs.next();
                let alpha = key as f32 / 100.0;
                self.pdf
                    .ext_graphics(id)
                    .non_stroking_alpha(alpha)
                    .stroking_alpha(alpha);
                (key, (graphics_state_name(key), id))
            })
            .collect()
    }

    fn write_images(&mut self, report: &LaidOutReport) -> ReportResult<Vec<(String, Ref)>> {
        let mut written = Vec::with_capacity(report.images.len());
        for (index, image) in report.images.iter().enumerate() {
            let refs = &mut self.refs;
            let id = image.write(&mut self.pdf, || refs.next())?;
            written.push((image_resource_name(index), id));
        }
        Ok(written)
    }

    fn write_content(&mut self, id: Ref, content: &[u8]) -> ReportResult<()> {
        if self.compress {
            let data = deflate(content)?;
            self.pdf.stream(id, &data).filter(Filter::FlateDecode);
        } else {
            self.pdf.stream(id, content);
        }
        Ok(())
    }
}

/// Replay a page's display list onto a fresh content stream
fn paint_page(page: &Page, names: &ResourceNames<'_>) -> ReportResult<Vec<u8>> {
    let mut canvas = PdfCanvas::new();
    for op in &page.ops {
        paint_op(&mut canvas, op, names)?;
    }
    Ok(canvas.finish())
}

fn paint_op(canvas: &mut PdfCanvas, op: &DrawOp, names: &ResourceNames<'_>) -> ReportResult<()> {
    match op {
        DrawOp::Rect { rect, style } => with_opacity(canvas, names, style.opacity, |c| {
            apply_shape_style(c, style);
            c.rect(*rect, style.fill.is_some(), style.stroke.is_some());
        }),
        DrawOp::RoundRect {
            rect,
            radius,
            style,
        } => with_opacity(canvas, names, style.opacity, |c| {
            apply_shape_style(c, style);
            c.round_rect(*rect, *radius, style.fill.is_some(), style.stroke.is_some());
        }),
        DrawOp::Circle { cx, cy, r, style } => with_opacity(canvas, names, style.opacity, |c| {
            apply_shape_style(c, style);
            c.circle(*cx, *cy, *r, style.fill.is_some(), style.stroke.is_some());
        }),
        DrawOp::Line {
            from,
            to,
            color,
            width,
            opacity,
        } => with_opacity(canvas, names, *opacity, |c| {
            c.set_stroke_color(*color);
            c.set_line_width(*width);
            c.line(from.0, from.1, to.0, to.1);
        }),
        DrawOp::Text(text) => with_opacity(canvas, names, text.opacity, |c| {
            c.set_fill_color(text.color);
            c.set_font(names.fonts.get(text.style).resource, text.size);
            c.draw_string(text.x, text.y, &text.text);
        }),
        DrawOp::Image { image, rect } => {
            let name = names.images.get(*image).ok_or_else(|| {
                ReportError::Serialization(format!("page refers to unknown image {}", image))
            })?;
            canvas.draw_image(name, rect.x, rect.y, rect.width, rect.height);
        }
    }
    Ok(())
}

fn apply_shape_style(canvas: &mut PdfCanvas, style: &ShapeStyle) {
    if let Some(fill) = style.fill {
        canvas.set_fill_color(fill);
    }
    if let Some(stroke) = style.stroke {
        canvas.set_stroke_color(stroke);
        canvas.set_line_width(style.line_width);
    }
}

/// Run `draw` inside its own graphics state when the opacity needs one
fn with_opacity(
    canvas: &mut PdfCanvas,
    names: &ResourceNames<'_>,
    opacity: f64,
    draw: impl FnOnce(&mut PdfCanvas),
) {
    match names.graphics_state(opacity) {
        Some(state) => {
            canvas.save_state();
            canvas.set_graphics_state(state);
            draw(canvas);
            canvas.restore_state();
        }
        None => draw(canvas),
    }
}
