//! Narrative sections backed by questionnaire answers
//!
//! Structured answers (milestones, founder fit, capital allocation) get
//! their own layouts. When one of them does not parse, its raw text is
//! rendered like any other answer.

use log::debug;

use crate::flow::{Cursor, PageFlow};
use crate::font_registry::FontStyle;
use crate::model::{CapitalAllocation, FounderFit, Milestone, Structured};
use crate::plan::NarrativeKind;
use crate::style::{line_height, BODY_SIZE, SMALL_SIZE};
use crate::text_encoding::sanitize;
use crate::text_layout::wrap;
use crate::types::Rect;

use super::{progress_bar, text_card};

const DATE_COLUMN: f64 = 90.0;
const TIMELINE_INDENT: f64 = 18.0;

pub fn render(flow: &mut PageFlow<'_>, kind: NarrativeKind) -> Cursor {
    let ctx = flow.ctx();
    let labels = ctx.labels;

    if let Some(text) = ctx.model.narrative_for(kind.narrative_key()) {
        text_card(
            flow,
            Some(labels.analysis),
            &[text.to_string()],
            ctx.palette.secondary.tint(0.85),
            ctx.palette.primary,
        );
    }

    for &key in kind.backing_keys() {
        if !ctx.model.answers.is_present(key) {
            continue;
        }
        flow.subheading(labels.answer_label(key));
        match key {
            "milestones" => milestones(flow),
            "founder_market_fit" => founder_fit(flow),
            "capital_block" => capital(flow),
            "runway" => runway(flow),
            _ => plain_answer(flow, key),
        }
        flow.advance(6.0);
    }
    flow.cursor()
}

fn plain_answer(flow: &mut PageFlow<'_>, key: &str) {
    let ctx = flow.ctx();
    let text = ctx
        .model
        .answers
        .text(key)
        .unwrap_or_else(|| ctx.labels.placeholder.to_string());
    body(flow, &text);
}

fn body(flow: &mut PageFlow<'_>, text: &str) {
    let (x, width, color) = (flow.left(), flow.width(), flow.ctx().palette.text);
    flow.body_text(text, x, width, BODY_SIZE, color);
}

fn raw_fallback(flow: &mut PageFlow<'_>, key: &str, raw: &str) {
    debug!("answer '{}' is not structured, rendering as text", key);
    body(flow, raw);
}

/// Timeline rows: dot, date column, wrapped milestone text
fn milestones(flow: &mut PageFlow<'_>) {
    let ctx = flow.ctx();
    let list = match ctx.model.answers.structured::<Vec<Milestone>>("milestones") {
        Structured::Parsed(list) => list,
        Structured::Raw(raw) => {
            raw_fallback(flow, "milestones", &raw);
            return;
        }
        Structured::Absent => return,
    };
    if list.is_empty() {
        body(flow, ctx.labels.placeholder);
        return;
    }

    let lh = line_height(BODY_SIZE);
    let x = flow.left();
    let text_x = x + TIMELINE_INDENT + DATE_COLUMN;
    let text_width = flow.width() - TIMELINE_INDENT - DATE_COLUMN;
    for item in &list {
        let lines = wrap(&sanitize(&item.milestone), text_width, &ctx.fonts.regular, BODY_SIZE);
        let lines = flow.fit_to_page(lines, lh, 6.0);
        let height = lines.len().max(1) as f64 * lh + 6.0;
        flow.ensure_space(height);

        let top = flow.y();
        let date = item
            .date
            .as_deref()
            .map(sanitize)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "-".to_string());
        let page = flow.page();
        page.draw_circle(x + 5.0, top - BODY_SIZE * 0.6, 4.0, ctx.palette.primary, None);
        page.draw_line(
            (x + 5.0, top - BODY_SIZE * 0.6 - 4.0),
            (x + 5.0, top - height),
            ctx.palette.secondary,
            1.0,
        );
        page.draw_text(
            &date,
            x + TIMELINE_INDENT,
            top - BODY_SIZE,
            BODY_SIZE,
            FontStyle::Bold,
            ctx.palette.primary,
            None,
        );
        let mut y = top;
        for line in &lines {
            page.draw_text(line, text_x, y - BODY_SIZE, BODY_SIZE, FontStyle::Regular, ctx.palette.text, None);
            y -= lh;
        }
        flow.advance(height);
    }
}

/// "n/5" rating dots followed by the motivation text
fn founder_fit(flow: &mut PageFlow<'_>) {
    let ctx = flow.ctx();
    let fit = match ctx.model.answers.structured::<FounderFit>("founder_market_fit") {
        Structured::Parsed(fit) => fit,
        Structured::Raw(raw) => {
            raw_fallback(flow, "founder_market_fit", &raw);
            return;
        }
        Structured::Absent => return,
    };

    let score = fit.score.clamp(0.0, 5.0);
    flow.ensure_space(24.0);
    let x = flow.left();
    let cy = flow.y() - 8.0;
    let filled = score.round() as usize;
    let label = ctx.labels.founder_fit(score);
    let page = flow.page();
    for i in 0..5 {
        let color = if i < filled {
            ctx.palette.primary
        } else {
            ctx.palette.light_gray
        };
        page.draw_circle(x + 6.0 + i as f64 * 16.0, cy, 6.0, color, None);
    }
    page.draw_text(&label, x + 96.0, cy - 4.0, BODY_SIZE, FontStyle::Bold, ctx.palette.text, None);
    flow.advance(24.0);

    if let Some(text) = fit.text.as_deref().filter(|t| !t.trim().is_empty()) {
        body(flow, text);
    }
}

/// Capital requirement line plus one bar per allocation bucket
fn capital(flow: &mut PageFlow<'_>) {
    let ctx = flow.ctx();
    let allocation = match ctx.model.answers.structured::<CapitalAllocation>("capital_block") {
        Structured::Parsed(allocation) => allocation,
        Structured::Raw(raw) => {
            raw_fallback(flow, "capital_block", &raw);
            return;
        }
        Structured::Absent => return,
    };

    let amount = allocation.amount.to_string();
    super::labeled_value(flow, ctx.labels.capital_need, &amount);
    flow.advance(4.0);

    let buckets: Vec<(&str, f64)> = ctx
        .labels
        .allocation
        .iter()
        .zip([allocation.product, allocation.sales, allocation.team, allocation.other])
        .filter_map(|(label, value)| value.map(|v| (*label, v.max(0.0))))
        .collect();
    let total: f64 = buckets.iter().map(|(_, v)| v).sum();
    // Shares are percentages unless they add up to more than 100
    let scale = if total > 100.0 { total } else { 100.0 };

    const ROW: f64 = 22.0;
    let x = flow.left();
    let bar_width = flow.width() - 120.0 - 50.0;
    for (label, value) in buckets {
        flow.ensure_space(ROW);
        let baseline = flow.y() - BODY_SIZE - 2.0;
        let percent = format!("{:.0}%", value / scale * 100.0);
        let page = flow.page();
        page.draw_text(label, x, baseline, BODY_SIZE, FontStyle::Regular, ctx.palette.text, None);
        progress_bar(
            page,
            Rect::new(x + 120.0, baseline - 1.0, bar_width, 9.0),
            value / scale,
            ctx.palette.primary,
            ctx.palette.light_gray,
        );
        page.draw_text(
            &percent,
            x + 130.0 + bar_width,
            baseline,
            SMALL_SIZE + 1.0,
            FontStyle::Bold,
            ctx.palette.text,
            None,
        );
        flow.advance(ROW);
    }
}

fn runway(flow: &mut PageFlow<'_>) {
    let ctx = flow.ctx();
    match ctx.model.answers.number("runway") {
        Some(months) => {
            let text = ctx.labels.runway(months);
            body(flow, &text);
        }
        None => plain_answer(flow, "runway"),
    }
}
