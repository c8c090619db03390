//! Section renderers
//!
//! Each renderer draws one section through the `PageFlow` and returns the
//! cursor where it stopped. Headings are drawn by the pagination
//! controller before the renderer runs. The widgets below are shared by
//! several sections.

pub mod action_plan;
pub mod benchmark;
pub mod breakdown;
pub mod cover;
pub mod film;
pub mod financials;
pub mod images;
pub mod investment;
pub mod market;
pub mod narrative;
pub mod recommendations;
pub mod risks;
pub mod summary;
pub mod swot;
pub mod table;
pub mod toc;

use crate::config::Palette;
use crate::flow::{draw_rich_line, Cursor, PageFlow};
use crate::font_registry::{FontHandle, FontStyle};
use crate::page::Page;
use crate::pagination::TocEntry;
use crate::plan::{PremiumData, Section};
use crate::scoring::{BarLevel, ScoreBand};
use crate::style::{
    line_height, BODY_SIZE, CARD_PADDING, CARD_RADIUS, SMALL_SIZE, SUBHEADING_SIZE,
};
use crate::text_encoding::sanitize;
use crate::text_layout::{parse_bold_spans, truncate_to_width, wrap_rich, RichLine};
use crate::types::{Color, Rect};

/// Vertical space after a card
pub(crate) const CARD_GAP: f64 = 10.0;
const ACCENT_WIDTH: f64 = 4.0;

pub fn render_section(section: Section, flow: &mut PageFlow<'_>, toc: &[TocEntry]) -> Cursor {
    let premium = flow.ctx().premium();
    match section {
        Section::Cover => cover::render(flow),
        Section::TableOfContents => toc::render(flow, toc),
        Section::Summary => summary::render(flow),
        Section::ScoreBreakdown => breakdown::render(flow),
        Section::Narrative(kind) => narrative::render(flow, kind),
        Section::ActionPlan => action_plan::render(flow),
        _ => match premium {
            Some(data) => render_premium(section, flow, data),
            None => flow.cursor(),
        },
    }
}

fn render_premium(section: Section, flow: &mut PageFlow<'_>, data: &PremiumData) -> Cursor {
    match (section, data) {
        (Section::Swot, PremiumData { swot: Some(swot), .. }) => swot::render(flow, swot),
        (
            Section::FinancialProjections,
            PremiumData {
                projections: Some(projections),
                ..
            },
        ) => financials::render(flow, projections),
        (
            Section::Benchmarks,
            PremiumData {
                benchmarks: Some(benchmarks),
                ..
            },
        ) => benchmark::render(flow, benchmarks),
        (
            Section::InvestmentProposal,
            PremiumData {
                investment: Some(proposal),
                ..
            },
        ) => investment::render(flow, proposal),
        (Section::MarketInsights, PremiumData { market: Some(market), .. }) => {
            market::render(flow, market)
        }
        (
            Section::Recommendations,
            PremiumData {
                recommendations: Some(recommendations),
                ..
            },
        ) => recommendations::render(flow, recommendations),
        (Section::RiskMatrix, PremiumData { risks: Some(risks), .. }) => risks::render(flow, risks),
        (Section::FilmScript, PremiumData { film: Some(film), .. }) => film::render(flow, film),
        (
            Section::ImagePrompts,
            PremiumData {
                image_prompts: Some(prompts),
                ..
            },
        ) => images::render(flow, prompts),
        _ => flow.cursor(),
    }
}

/// Color that goes with a score band
pub(crate) fn band_color(band: ScoreBand, palette: &Palette) -> Color {
    match band {
        ScoreBand::Exceptional | ScoreBand::VeryStrong => palette.success,
        ScoreBand::Investable => palette.primary,
        ScoreBand::NeedsWork => palette.warning,
        ScoreBand::EarlyStage => palette.danger,
    }
}

pub(crate) fn bar_color(level: BarLevel, palette: &Palette) -> Color {
    match level {
        BarLevel::Good => palette.success,
        BarLevel::Fair => palette.warning,
        BarLevel::Poor => palette.danger,
    }
}

/// Text centered on `cx`
#[allow(clippy::too_many_arguments)]
pub(crate) fn centered_text(
    page: &mut Page,
    font: &FontHandle,
    text: &str,
    cx: f64,
    baseline: f64,
    size: f64,
    color: Color,
    opacity: Option<f64>,
) {
    let x = cx - font.width_of(text, size) / 2.0;
    page.draw_text(text, x, baseline, size, font.id.style, color, opacity);
}

/// Text ending at `right`
pub(crate) fn right_aligned_text(
    page: &mut Page,
    font: &FontHandle,
    text: &str,
    right: f64,
    baseline: f64,
    size: f64,
    color: Color,
) {
    let x = right - font.width_of(text, size);
    page.draw_text(text, x, baseline, size, font.id.style, color, None);
}

/// Horizontal bar: full-width track with a proportional fill
pub(crate) fn progress_bar(page: &mut Page, track: Rect, ratio: f64, fill: Color, track_color: Color) {
    page.draw_round_rect(track, track.height / 2.0, track_color, None);
    let filled = track.width * ratio.clamp(0.0, 1.0);
    if filled > 0.5 {
        page.draw_round_rect(
            Rect::new(track.x, track.y, filled.max(track.height), track.height),
            track.height / 2.0,
            fill,
            None,
        );
    }
}

/// Small label over a large value in a tinted box
pub(crate) fn metric_card(
    flow: &mut PageFlow<'_>,
    rect: Rect,
    label: &str,
    value: &str,
    accent: Color,
) {
    let ctx = flow.ctx();
    let bold = *ctx.font(FontStyle::Bold);
    let regular = *ctx.font(FontStyle::Regular);
    let inner = rect.width - 2.0 * CARD_PADDING;
    let label = truncate_to_width(&sanitize(label), inner, &regular, SMALL_SIZE);
    let value = truncate_to_width(&sanitize(value), inner, &bold, 16.0);

    let page = flow.page();
    page.draw_round_rect(rect, CARD_RADIUS, ctx.palette.light_gray, None);
    page.draw_rect(
        Rect::new(rect.x, rect.y, ACCENT_WIDTH, rect.height),
        accent,
        None,
    );
    let x = rect.x + CARD_PADDING;
    page.draw_text(
        &label,
        x,
        rect.top() - CARD_PADDING - SMALL_SIZE,
        SMALL_SIZE,
        FontStyle::Regular,
        ctx.palette.medium_gray,
        None,
    );
    page.draw_text(
        &value,
        x,
        rect.y + CARD_PADDING,
        16.0,
        FontStyle::Bold,
        accent,
        None,
    );
}

/// Row of equally wide metric cards at the cursor
pub(crate) fn metric_row(flow: &mut PageFlow<'_>, cards: &[(String, String, Color)]) {
    if cards.is_empty() {
        return;
    }
    const HEIGHT: f64 = 64.0;
    const GAP: f64 = 12.0;
    flow.ensure_space(HEIGHT);
    let n = cards.len() as f64;
    let width = (flow.width() - GAP * (n - 1.0)) / n;
    let top = flow.y();
    for (i, (label, value, accent)) in cards.iter().enumerate() {
        let x = flow.left() + i as f64 * (width + GAP);
        metric_card(flow, Rect::from_top(x, top, width, HEIGHT), label, value, *accent);
    }
    flow.advance(HEIGHT + 16.0);
}

/// Rounded card with an optional title and rich-text paragraphs
///
/// A card never spans pages. Paragraphs that would not fit on an empty
/// page are cut at the last line that does.
pub(crate) fn text_card(
    flow: &mut PageFlow<'_>,
    title: Option<&str>,
    paragraphs: &[String],
    fill: Color,
    accent: Color,
) {
    let ctx = flow.ctx();
    let x = flow.left();
    let width = flow.width();
    let inner_x = x + ACCENT_WIDTH + CARD_PADDING;
    let inner_width = width - ACCENT_WIDTH - 2.0 * CARD_PADDING;
    let lh = line_height(BODY_SIZE);

    let lines: Vec<RichLine> = paragraphs
        .iter()
        .flat_map(|p| wrap_rich(&parse_bold_spans(&sanitize(p)), inner_width, &ctx.fonts, BODY_SIZE))
        .collect();
    if lines.is_empty() && title.is_none() {
        return;
    }

    let title_height = if title.is_some() {
        line_height(SUBHEADING_SIZE)
    } else {
        0.0
    };
    let overhead = 2.0 * CARD_PADDING + title_height;
    let lines = flow.fit_to_page(lines, lh, overhead);
    let height = overhead + lines.len() as f64 * lh;

    flow.ensure_space(height);
    let top = flow.y();
    let fonts = ctx.fonts;
    let page = flow.page();
    page.draw_round_rect(Rect::from_top(x, top, width, height), CARD_RADIUS, fill, None);
    page.draw_rect(
        Rect::from_top(x, top, ACCENT_WIDTH, height),
        accent,
        None,
    );

    let mut y = top - CARD_PADDING;
    if let Some(title) = title {
        let title = truncate_to_width(
            &sanitize(title),
            inner_width,
            &fonts.bold,
            SUBHEADING_SIZE,
        );
        page.draw_text(
            &title,
            inner_x,
            y - SUBHEADING_SIZE,
            SUBHEADING_SIZE,
            FontStyle::Bold,
            accent,
            None,
        );
        y -= title_height;
    }
    for line in &lines {
        draw_rich_line(page, &fonts, line, inner_x, y - BODY_SIZE, BODY_SIZE, ctx.palette.text);
        y -= lh;
    }
    flow.advance(height + CARD_GAP);
}

/// Subheading followed by bullets; nothing when the list is empty
pub(crate) fn titled_list(flow: &mut PageFlow<'_>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    flow.subheading(title);
    let (x, width, color) = (flow.left(), flow.width(), flow.ctx().palette.text);
    flow.bullet_list(items, x, width, BODY_SIZE, color);
    flow.advance(8.0);
}

/// `**label:** value` paragraph
pub(crate) fn labeled_value(flow: &mut PageFlow<'_>, label: &str, value: &str) {
    let (x, width, color) = (flow.left(), flow.width(), flow.ctx().palette.text);
    flow.rich_paragraph(&format!("**{}:** {}", label, value), x, width, BODY_SIZE, color);
}

/// Text of an optional field, or the locale placeholder
pub(crate) fn or_placeholder(flow: &PageFlow<'_>, value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| flow.ctx().labels.placeholder.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::ReportConfig;
    use crate::context::RenderContext;
    use crate::font_registry::{FontFamily, FontRegistry};
    use crate::model::ReportModel;

    /// Run `f` against a context built from `json` with default config
    pub fn with_ctx<F: FnOnce(&RenderContext)>(json: &str, f: F) {
        with_config(json, &ReportConfig::default(), f)
    }

    pub fn with_config<F: FnOnce(&RenderContext)>(json: &str, config: &ReportConfig, f: F) {
        let model = ReportModel::from_json_str(json).unwrap();
        let mut registry = FontRegistry::new(FontFamily::Helvetica);
        let ctx = RenderContext::build(&model, config, &mut registry, None).unwrap();
        f(&ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::with_ctx;
    use super::*;
    use crate::page::DrawOp;

    #[test]
    fn test_text_card_stays_on_one_page() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            flow.advance(560.0);
            let body = vec!["Ett längre stycke text som behöver flera rader. ".repeat(6)];
            text_card(&mut flow, Some("Analys"), &body, Color::white(), ctx.palette.primary);
            assert_eq!(flow.pages().len(), 2);
            assert!(flow.pages()[1].contains_text("Analys"));
            assert!(!flow.pages()[0].contains_text("Analys"));
        });
    }

    #[test]
    fn test_oversized_card_is_truncated_to_one_page() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            let body = vec!["ord ".repeat(4000)];
            text_card(&mut flow, None, &body, Color::white(), ctx.palette.primary);
            assert_eq!(flow.pages().len(), 1);
            let lowest = flow.pages()[0]
                .ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::RoundRect { rect, .. } => Some(rect.y),
                    _ => None,
                })
                .fold(f64::MAX, f64::min);
            assert!(lowest >= ctx.layout.bottom_margin - 0.5);
        });
    }

    #[test]
    fn test_band_colors() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            assert_eq!(band_color(ScoreBand::EarlyStage, &ctx.palette), ctx.palette.danger);
            assert_eq!(bar_color(BarLevel::Good, &ctx.palette), ctx.palette.success);
        });
    }
}
