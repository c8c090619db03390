//! Executive summary: metric cards, overview paragraph, strengths and
//! improvement columns

use crate::flow::{Cursor, PageFlow};
use crate::font_registry::{FontSet, FontStyle};
use crate::page::Page;
use crate::scoring::{breakdown, question_keys, strengths, weaknesses};
use crate::style::{line_height, BODY_SIZE, SUBHEADING_SIZE};
use crate::text_encoding::sanitize;
use crate::text_layout::wrap;
use crate::types::Color;

use super::{band_color, metric_row};

const COLUMN_GAP: f64 = 20.0;
const ITEM_GAP: f64 = 4.0;
const BULLET_INDENT: f64 = 12.0;

pub fn render(flow: &mut PageFlow<'_>) -> Cursor {
    let ctx = flow.ctx();
    let labels = ctx.labels;
    let palette = ctx.palette;
    let answered = ctx.model.answers.answered_count();
    let total = question_keys().len();
    let accent = band_color(ctx.band, &palette);

    metric_row(
        flow,
        &[
            (
                labels.card_score.to_string(),
                format!("{}/100", ctx.score.value()),
                accent,
            ),
            (
                labels.card_assessment.to_string(),
                labels.band_label(ctx.band).to_string(),
                accent,
            ),
            (
                labels.card_answered.to_string(),
                format!("{} / {}", answered.min(total), total),
                palette.primary,
            ),
        ],
    );

    let overview = ctx
        .model
        .narrative_for("summary")
        .map(str::to_string)
        .unwrap_or_else(|| {
            let answered = answered.min(total);
            labels.summary_sentence(&ctx.company(), ctx.score.value(), ctx.band, answered, total)
        });
    let (x, width) = (flow.left(), flow.width());
    flow.body_text(&overview, x, width, BODY_SIZE, palette.text);
    flow.advance(14.0);

    let scores = breakdown(ctx.model);
    let strong = strengths(&scores, labels);
    let weak = weaknesses(&scores, ctx.score, labels);

    let column_width = (width - COLUMN_GAP) / 2.0;
    let left = Column::new(labels.strengths, &strong, labels.none_identified, palette.success);
    let right = Column::new(labels.improvements, &weak, labels.none_identified, palette.warning);
    let left_lines = left.wrap(&ctx.fonts, column_width);
    let right_lines = right.wrap(&ctx.fonts, column_width);
    let needed = Column::height(&left_lines).max(Column::height(&right_lines));
    flow.ensure_space(needed);

    // Both columns start from the same snapshot; the cursor continues below
    // whichever ends lower.
    let start = flow.y();
    let page = flow.page();
    let left_end = left.draw(page, &left_lines, x, start, palette.text);
    let right_end = right.draw(
        page,
        &right_lines,
        x + column_width + COLUMN_GAP,
        start,
        palette.text,
    );
    flow.advance(start - left_end.min(right_end));
    flow.cursor()
}

struct Column<'c> {
    title: &'c str,
    items: &'c [String],
    empty: &'c str,
    accent: Color,
}

impl<'c> Column<'c> {
    fn new(title: &'c str, items: &'c [String], empty: &'c str, accent: Color) -> Self {
        Self {
            title,
            items,
            empty,
            accent,
        }
    }

    fn wrap(&self, fonts: &FontSet, width: f64) -> Vec<Vec<String>> {
        if self.items.is_empty() {
            return vec![vec![self.empty.to_string()]];
        }
        self.items
            .iter()
            .map(|item| wrap(&sanitize(item), width - BULLET_INDENT, &fonts.regular, BODY_SIZE))
            .collect()
    }

    fn height(lines: &[Vec<String>]) -> f64 {
        let body: f64 = lines
            .iter()
            .map(|item| item.len() as f64 * line_height(BODY_SIZE) + ITEM_GAP)
            .sum();
        line_height(SUBHEADING_SIZE) + body
    }

    /// Draw the column from `top` and return the y where it ends
    fn draw(
        &self,
        page: &mut Page,
        lines: &[Vec<String>],
        x: f64,
        top: f64,
        color: Color,
    ) -> f64 {
        let mut y = top;
        page.draw_text(
            self.title,
            x,
            y - SUBHEADING_SIZE,
            SUBHEADING_SIZE,
            FontStyle::Bold,
            self.accent,
            None,
        );
        y -= line_height(SUBHEADING_SIZE);

        let lh = line_height(BODY_SIZE);
        for item in lines {
            if self.items.is_empty() {
                let text = item.join(" ");
                page.draw_text(&text, x, y - BODY_SIZE, BODY_SIZE, FontStyle::Oblique, color, Some(0.7));
                y -= lh;
                continue;
            }
            for (i, line) in item.iter().enumerate() {
                if i == 0 {
                    page.draw_circle(x + 3.0, y - BODY_SIZE * 0.65, 2.0, self.accent, None);
                }
                let baseline = y - BODY_SIZE;
                page.draw_text(line, x + BULLET_INDENT, baseline, BODY_SIZE, FontStyle::Regular, color, None);
                y -= lh;
            }
            y -= ITEM_GAP;
        }
        y
    }
}
