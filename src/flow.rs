//! Page flow and vertical cursor
//!
//! `PageFlow` is the single owner of the page list and of the cursor for
//! one document. Renderers draw through it and ask it for space; it
//! allocates continuation pages when the cursor would cross the bottom
//! margin.
//!
//! Text lines are laid out top-down: the cursor marks the top of the next
//! line box, the baseline sits one font size below it, and the cursor
//! then drops by the line height.

use log::{debug, warn};

use crate::context::RenderContext;
use crate::font_registry::{FontSet, FontStyle};
use crate::page::{Page, PageKind};
use crate::style::{line_height, BULLET_INDENT, SUBHEADING_SIZE};
use crate::text_encoding::sanitize;
use crate::text_layout::{parse_bold_spans, truncate_to_width, wrap, wrap_rich, RichLine};
use crate::types::{Color, Rect};

/// Current page index and vertical position on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f64,
}

pub struct PageFlow<'a> {
    ctx: &'a RenderContext<'a>,
    pages: Vec<Page>,
    cursor: Cursor,
}

impl<'a> PageFlow<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self {
            ctx,
            pages: Vec::new(),
            cursor: Cursor { page: 0, y: 0.0 },
        }
    }

    pub fn ctx(&self) -> &'a RenderContext<'a> {
        self.ctx
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn y(&self) -> f64 {
        self.cursor.y
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub(crate) fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn left(&self) -> f64 {
        self.ctx.layout.margin_left
    }

    pub fn width(&self) -> f64 {
        self.ctx.layout.content_width()
    }

    /// Current page; allocates a body page when nothing exists yet
    pub fn page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.new_page();
        }
        let index = self.cursor.page;
        &mut self.pages[index]
    }

    /// Start the cover; it carries no header band and no page number
    pub fn cover_page(&mut self) -> &mut Page {
        self.pages
            .push(Page::new(self.ctx.layout.page_size(), PageKind::Cover));
        self.cursor = Cursor {
            page: self.pages.len() - 1,
            y: self.ctx.layout.page_height,
        };
        let index = self.cursor.page;
        &mut self.pages[index]
    }

    /// Allocate a body page, draw its running header and reset the cursor
    pub fn new_page(&mut self) {
        let mut page = Page::new(self.ctx.layout.page_size(), PageKind::Body);
        self.draw_running_header(&mut page);
        self.pages.push(page);
        self.cursor = Cursor {
            page: self.pages.len() - 1,
            y: self.ctx.layout.content_top(),
        };
        debug!("allocated page {}", self.cursor.page);
    }

    fn draw_running_header(&self, page: &mut Page) {
        let ctx = self.ctx;
        let layout = &ctx.layout;
        let band = Rect::from_top(
            0.0,
            layout.page_height,
            layout.page_width,
            layout.header_height,
        );
        page.draw_rect(band, ctx.palette.primary, None);
        page.draw_rect(
            Rect::new(0.0, band.bottom() - 2.0, layout.page_width, 2.0),
            ctx.palette.secondary,
            None,
        );

        let size = 9.0;
        let baseline = band.bottom() + (layout.header_height - size) / 2.0 + 1.0;
        let bold = ctx.font(FontStyle::Bold);
        page.draw_text(
            &ctx.title,
            layout.margin_left,
            baseline,
            size,
            FontStyle::Bold,
            Color::white(),
            None,
        );

        let title_width = bold.width_of(&ctx.title, size);
        let available = layout.content_width() - title_width - 20.0;
        if available > 40.0 {
            let regular = ctx.font(FontStyle::Regular);
            let company = truncate_to_width(&sanitize(&ctx.company()), available, regular, size);
            let x = layout.page_width - layout.margin_right - regular.width_of(&company, size);
            page.draw_text(
                &company,
                x,
                baseline,
                size,
                FontStyle::Regular,
                Color::white(),
                Some(0.85),
            );
        }
    }

    /// True when nothing has been drawn below the header of the current page
    pub fn is_fresh_page(&self) -> bool {
        matches!(self.pages.get(self.cursor.page), Some(p) if p.kind == PageKind::Body)
            && (self.cursor.y - self.ctx.layout.content_top()).abs() < 0.5
    }

    /// Space left above the bottom margin
    pub fn remaining(&self) -> f64 {
        self.cursor.y - self.ctx.layout.bottom_margin
    }

    /// Usable height of an empty body page
    pub fn full_capacity(&self) -> f64 {
        self.ctx.layout.content_top() - self.ctx.layout.bottom_margin
    }

    /// Make room for `required` points, allocating at most one page
    ///
    /// Returns true when a page was allocated. A fresh page is never
    /// abandoned: if the item is taller than a whole page it stays here and
    /// the caller truncates it.
    pub fn ensure_space(&mut self, required: f64) -> bool {
        let on_body_page =
            matches!(self.pages.get(self.cursor.page), Some(p) if p.kind == PageKind::Body);
        if !on_body_page {
            self.new_page();
            return true;
        }
        if required <= self.remaining() {
            return false;
        }
        if self.is_fresh_page() {
            warn!(
                "item of {:.0}pt exceeds page capacity of {:.0}pt on page {}; truncating",
                required,
                self.full_capacity(),
                self.cursor.page
            );
            return false;
        }
        self.new_page();
        true
    }

    pub fn advance(&mut self, dy: f64) {
        self.cursor.y -= dy;
    }

    /// Add vertical space unless the cursor is at the top of a page
    pub fn gap(&mut self, dy: f64) {
        if !self.is_fresh_page() {
            self.advance(dy);
        }
    }

    /// Keep at most as many items as fit on one empty page
    pub fn fit_to_page<T>(&self, mut items: Vec<T>, item_height: f64, overhead: f64) -> Vec<T> {
        let max_items = ((self.full_capacity() - overhead) / item_height).floor().max(1.0) as usize;
        if items.len() > max_items {
            warn!(
                "truncating block from {} to {} lines to fit one page",
                items.len(),
                max_items
            );
            items.truncate(max_items);
        }
        items
    }

    /// Draw a single line at the cursor and advance by its line height
    pub fn text_line(&mut self, text: &str, x: f64, size: f64, style: FontStyle, color: Color) {
        let lh = line_height(size);
        self.ensure_space(lh);
        let baseline = self.cursor.y - size;
        self.page().draw_text(text, x, baseline, size, style, color, None);
        self.advance(lh);
    }

    /// Wrapped single-style paragraph
    pub fn paragraph(
        &mut self,
        text: &str,
        x: f64,
        width: f64,
        size: f64,
        style: FontStyle,
        color: Color,
    ) {
        let font = *self.ctx.font(style);
        for line in wrap(&sanitize(text), width, &font, size) {
            self.text_line(&line, x, size, style, color);
        }
    }

    /// Wrapped paragraph honoring `**bold**` spans
    pub fn rich_paragraph(&mut self, text: &str, x: f64, width: f64, size: f64, color: Color) {
        let spans = parse_bold_spans(&sanitize(text));
        for line in wrap_rich(&spans, width, &self.ctx.fonts, size) {
            self.rich_line(&line, x, size, color);
        }
    }

    /// Draw one pre-wrapped rich line at the cursor
    pub fn rich_line(&mut self, line: &RichLine, x: f64, size: f64, color: Color) {
        let lh = line_height(size);
        self.ensure_space(lh);
        let baseline = self.cursor.y - size;
        let fonts = self.ctx.fonts;
        draw_rich_line(self.page(), &fonts, line, x, baseline, size, color);
        self.advance(lh);
    }

    /// Bulleted item; the bullet shares a page with the first line
    pub fn bullet_item(&mut self, text: &str, x: f64, width: f64, size: f64, color: Color) {
        let spans = parse_bold_spans(&sanitize(text));
        let lines = wrap_rich(&spans, width - BULLET_INDENT, &self.ctx.fonts, size);
        let bullet_color = self.ctx.palette.primary;
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                self.ensure_space(line_height(size));
                let cy = self.cursor.y - size * 0.65;
                self.page().draw_circle(x + 4.0, cy, 1.8, bullet_color, None);
            }
            self.rich_line(line, x + BULLET_INDENT, size, color);
        }
    }

    pub fn bullet_list<S: AsRef<str>>(
        &mut self,
        items: &[S],
        x: f64,
        width: f64,
        size: f64,
        color: Color,
    ) {
        for item in items {
            self.bullet_item(item.as_ref(), x, width, size, color);
        }
    }

    /// Numbered item with a hanging indent
    pub fn numbered_item(
        &mut self,
        label: &str,
        text: &str,
        x: f64,
        width: f64,
        size: f64,
        color: Color,
    ) {
        let spans = parse_bold_spans(&sanitize(text));
        let lines = wrap_rich(&spans, width - BULLET_INDENT - 4.0, &self.ctx.fonts, size);
        let label_color = self.ctx.palette.primary;
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                self.ensure_space(line_height(size));
                let baseline = self.cursor.y - size;
                self.page()
                    .draw_text(label, x, baseline, size, FontStyle::Bold, label_color, None);
            }
            self.rich_line(line, x + BULLET_INDENT + 4.0, size, color);
        }
    }

    /// Free-form answer or narrative text
    ///
    /// Lines starting with `-`, `•` or `*` become bullets, `1.`/`1)` become
    /// numbered items, blank lines separate paragraphs.
    pub fn body_text(&mut self, text: &str, x: f64, width: f64, size: f64, color: Color) {
        let cleaned = sanitize(text);
        for raw in cleaned.split('\n') {
            let line = raw.trim();
            if line.is_empty() {
                self.advance(line_height(size) * 0.4);
                continue;
            }
            if let Some(rest) = strip_bullet(line) {
                self.bullet_item(rest, x, width, size, color);
            } else if let Some((number, rest)) = split_numbered(line) {
                self.numbered_item(number, rest, x, width, size, color);
            } else {
                self.rich_paragraph(line, x, width, size, color);
            }
        }
    }

    /// Bold sub-label above a block of body text
    pub fn subheading(&mut self, text: &str) {
        let body = line_height(crate::style::BODY_SIZE);
        self.ensure_space(line_height(SUBHEADING_SIZE) + body);
        let color = self.ctx.palette.primary;
        let x = self.left();
        self.text_line(text, x, SUBHEADING_SIZE, FontStyle::Bold, color);
        self.advance(2.0);
    }
}

/// Draw the segments of a wrapped line back to back from `x`
pub fn draw_rich_line(
    page: &mut Page,
    fonts: &FontSet,
    line: &RichLine,
    x: f64,
    baseline: f64,
    size: f64,
    color: Color,
) {
    let mut pen = x;
    for segment in &line.segments {
        let style = if segment.bold {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        };
        page.draw_text(&segment.text, pen, baseline, size, style, color, None);
        pen += fonts.get(style).width_of(&segment.text, size);
    }
}

fn strip_bullet(line: &str) -> Option<&str> {
    // "**bold**" at line start is emphasis, not a bullet
    if line.starts_with("**") {
        return None;
    }
    ["- ", "• ", "* "]
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .map(str::trim_start)
}

fn split_numbered(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits > 2 {
        return None;
    }
    let marker = line[digits..].chars().next()?;
    if marker != '.' && marker != ')' {
        return None;
    }
    let rest = &line[digits + 1..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some((&line[..digits + 1], rest.trim_start()))
}
