//! Pagination controller
//!
//! Drives the section renderers in plan order over a single `PageFlow`,
//! then stamps page numbers once the page count is final. Layout runs
//! twice: a dry pass with placeholder TOC numbers collects the page of
//! every section heading, and the final pass draws the real numbers.

use log::{debug, warn};

use crate::context::RenderContext;
use crate::flow::{Cursor, PageFlow};
use crate::font_registry::FontStyle;
use crate::page::{Page, PageKind};
use crate::plan::Section;
use crate::sections;
use crate::style::{line_height, section_heading_height, BODY_SIZE, SECTION_TITLE_SIZE, SMALL_SIZE};

/// Lines of body text that must fit below a flowing heading
const KEEP_WITH_NEXT_LINES: f64 = 3.0;
const SECTION_GAP: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Rendering,
    Finalizing,
    Done,
}

/// Page on which a section heading was drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAnchor {
    pub section: Section,
    pub title: String,
    pub page_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub section: Section,
    pub title: String,
    /// Printed page number; `None` during the dry pass
    pub page: Option<u32>,
}

/// Output of one complete layout pass
#[derive(Debug, Clone)]
pub struct LayoutPass {
    pub pages: Vec<Page>,
    pub anchors: Vec<SectionAnchor>,
}

impl LayoutPass {
    /// Printed number of the page a section starts on
    pub fn page_number_of(&self, section: Section) -> Option<u32> {
        let anchor = self.anchors.iter().find(|a| a.section == section)?;
        self.pages.get(anchor.page_index)?.number
    }
}

pub struct PaginationController<'a> {
    flow: PageFlow<'a>,
    state: FlowState,
    anchors: Vec<SectionAnchor>,
}

impl<'a> PaginationController<'a> {
    pub fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self {
            flow: PageFlow::new(ctx),
            state: FlowState::Idle,
            anchors: Vec::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Lay out every planned section and finalize the page list
    pub fn run(mut self, toc: &[TocEntry]) -> LayoutPass {
        let ctx = self.flow.ctx();
        self.state = FlowState::Rendering;

        for &section in ctx.plan.sections() {
            let start = self.begin_section(section);
            let end = sections::render_section(section, &mut self.flow, toc);
            debug!(
                "rendered {:?}: pages {}..={}, cursor y {:.1}",
                section, start.page, end.page, end.y
            );
        }

        self.finalize();
        LayoutPass {
            pages: self.flow.into_pages(),
            anchors: self.anchors,
        }
    }

    /// Position the cursor for a section and draw its heading
    fn begin_section(&mut self, section: Section) -> Cursor {
        let ctx = self.flow.ctx();
        if section == Section::Cover {
            self.flow.cover_page();
            return self.flow.cursor();
        }

        if section.starts_new_page() {
            self.flow.new_page();
        } else {
            self.flow.gap(SECTION_GAP);
            let required = section_heading_height() + KEEP_WITH_NEXT_LINES * line_height(BODY_SIZE);
            self.flow.ensure_space(required);
        }

        let title = ctx.labels.section_title(section);
        self.draw_heading(title);
        if section.in_toc() {
            self.anchors.push(SectionAnchor {
                section,
                title: title.to_string(),
                page_index: self.flow.cursor().page,
            });
        }
        self.flow.cursor()
    }

    fn draw_heading(&mut self, title: &str) {
        let ctx = self.flow.ctx();
        let x = self.flow.left();
        let top = self.flow.y();
        let baseline = top - SECTION_TITLE_SIZE;
        let page = self.flow.page();
        page.draw_text(
            title,
            x,
            baseline,
            SECTION_TITLE_SIZE,
            FontStyle::Bold,
            ctx.palette.primary,
            None,
        );
        let rule_y = baseline - 8.0;
        page.draw_line((x, rule_y), (x + 60.0, rule_y), ctx.palette.secondary, 2.5);
        self.flow.advance(section_heading_height());
    }

    /// Assign numbers to body pages and stamp the footers
    fn finalize(&mut self) {
        self.state = FlowState::Finalizing;
        let ctx = self.flow.ctx();
        let layout = ctx.layout;
        let regular = *ctx.font(FontStyle::Regular);

        let pages = self.flow.pages_mut();
        let total = pages.iter().filter(|p| p.kind == PageKind::Body).count() as u32;
        let mut number = 0;
        for page in pages.iter_mut() {
            if page.kind == PageKind::Cover {
                continue;
            }
            number += 1;
            page.number = Some(number);
            let stamp = ctx.labels.page_stamp(number, total);
            let x = (layout.page_width - regular.width_of(&stamp, SMALL_SIZE)) / 2.0;
            page.draw_text(
                &stamp,
                x,
                layout.footer_baseline,
                SMALL_SIZE,
                FontStyle::Regular,
                ctx.palette.medium_gray,
                Some(0.5),
            );
        }
        debug!("stamped {} of {} pages", total, pages.len());
        self.state = FlowState::Done;
    }
}

/// TOC entries for the planned sections, numbered from a finished pass
pub fn toc_entries(ctx: &RenderContext<'_>, numbered_from: Option<&LayoutPass>) -> Vec<TocEntry> {
    ctx.plan
        .toc_sections()
        .map(|section| TocEntry {
            section,
            title: ctx.labels.section_title(section).to_string(),
            page: numbered_from.and_then(|pass| pass.page_number_of(section)),
        })
        .collect()
}

/// Two-pass layout; returns the final pass and the TOC it printed
pub fn layout_document<'a>(ctx: &'a RenderContext<'a>) -> (LayoutPass, Vec<TocEntry>) {
    let placeholders = toc_entries(ctx, None);
    let dry_run = PaginationController::new(ctx).run(&placeholders);

    let toc = toc_entries(ctx, Some(&dry_run));
    let final_pass = PaginationController::new(ctx).run(&toc);

    if final_pass.anchors != dry_run.anchors || final_pass.pages.len() != dry_run.pages.len() {
        warn!(
            "TOC pass mismatch: dry run had {} pages, final pass {}",
            dry_run.pages.len(),
            final_pass.pages.len()
        );
    }
    (final_pass, toc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::font_registry::{FontFamily, FontRegistry};
    use crate::model::ReportModel;

    fn layout(json: &str) -> (LayoutPass, Vec<TocEntry>) {
        let model = ReportModel::from_json_str(json).unwrap();
        let mut registry = FontRegistry::new(FontFamily::Helvetica);
        let ctx = RenderContext::build(&model, &ReportConfig::default(), &mut registry, None).unwrap();
        layout_document(&ctx)
    }

    #[test]
    fn test_controller_walks_states() {
        let model = ReportModel::from_json_str(r#"{"score": 55}"#).unwrap();
        let mut registry = FontRegistry::new(FontFamily::Helvetica);
        let ctx = RenderContext::build(&model, &ReportConfig::default(), &mut registry, None).unwrap();
        let controller = PaginationController::new(&ctx);
        assert_eq!(controller.state(), FlowState::Idle);
        let pass = controller.run(&toc_entries(&ctx, None));
        assert_eq!(pass.pages[0].kind, PageKind::Cover);
    }

    #[test]
    fn test_cover_unnumbered_body_pages_sequential() {
        let (pass, _) = layout(r#"{"score": 55, "answers": {"team": "Två grundare"}}"#);
        assert!(pass.pages[0].number.is_none());
        let total = pass.pages.len() as u32 - 1;
        for (i, page) in pass.pages.iter().enumerate().skip(1) {
            assert_eq!(page.number, Some(i as u32));
            assert!(page.contains_text(&format!("Sida {} av {}", i, total)));
        }
    }

    #[test]
    fn test_toc_numbers_match_anchor_pages() {
        let (pass, toc) = layout(
            r#"{"score": 82, "answers": {"customer_problem": "Problem", "solution": "Lösning"}}"#,
        );
        assert_eq!(toc.len(), 4);
        for entry in &toc {
            assert!(entry.page.is_some());
            assert_eq!(entry.page, pass.page_number_of(entry.section));
        }
    }

    #[test]
    fn test_new_page_sections_start_on_their_own_page() {
        let (pass, _) = layout(r#"{"score": 40}"#);
        let summary = pass.anchors.iter().find(|a| a.section == Section::Summary).unwrap();
        let breakdown = pass
            .anchors
            .iter()
            .find(|a| a.section == Section::ScoreBreakdown)
            .unwrap();
        assert!(breakdown.page_index > summary.page_index);
        assert_eq!(summary.page_index, 2); // cover, toc, summary
    }
}
