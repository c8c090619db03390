//! Score breakdown: total score and one weighted bar per category

use crate::flow::{Cursor, PageFlow};
use crate::font_registry::FontStyle;
use crate::scoring::{breakdown, BarLevel};
use crate::style::BODY_SIZE;
use crate::types::Rect;

use super::{band_color, bar_color, progress_bar, right_aligned_text};

const ROW_HEIGHT: f64 = 30.0;
const LABEL_WIDTH: f64 = 150.0;
const FRACTION_WIDTH: f64 = 60.0;
const BAR_HEIGHT: f64 = 10.0;

pub fn render(flow: &mut PageFlow<'_>) -> Cursor {
    let ctx = flow.ctx();
    let palette = ctx.palette;
    let labels = ctx.labels;
    let fonts = ctx.fonts;
    let accent = band_color(ctx.band, &palette);

    // Total score block
    flow.ensure_space(70.0);
    let x = flow.left();
    let top = flow.y();
    let number = ctx.score.value().to_string();
    let number_width = fonts.bold.width_of(&number, 40.0);
    let page = flow.page();
    page.draw_text(labels.total_score, x, top - 10.0, 10.0, FontStyle::Regular, palette.medium_gray, None);
    page.draw_text(&number, x, top - 52.0, 40.0, FontStyle::Bold, accent, None);
    page.draw_text("/100", x + number_width + 4.0, top - 52.0, 14.0, FontStyle::Regular, palette.medium_gray, None);
    page.draw_text(
        labels.band_label(ctx.band),
        x + number_width + 50.0,
        top - 52.0,
        14.0,
        FontStyle::Bold,
        accent,
        None,
    );
    flow.advance(74.0);

    let bar_x = x + LABEL_WIDTH;
    let bar_width = flow.width() - LABEL_WIDTH - FRACTION_WIDTH - 10.0;
    let right = x + flow.width();
    for score in breakdown(ctx.model) {
        flow.ensure_space(ROW_HEIGHT);
        let top = flow.y();
        let baseline = top - BODY_SIZE - 4.0;
        let color = bar_color(BarLevel::from_ratio(score.ratio()), &palette);
        let fraction = format!("{}/{}", score.actual, score.max);

        let page = flow.page();
        page.draw_text(
            labels.category_name(score.category),
            x,
            baseline,
            BODY_SIZE,
            FontStyle::Regular,
            palette.text,
            None,
        );
        let track = Rect::new(bar_x, baseline - 1.0, bar_width, BAR_HEIGHT);
        progress_bar(page, track, score.ratio(), color, palette.light_gray);
        right_aligned_text(page, &fonts.bold, &fraction, right, baseline, BODY_SIZE, palette.text);
        flow.advance(ROW_HEIGHT);
    }

    if let Some(analysis) = ctx.model.narrative_for("score_breakdown") {
        flow.advance(8.0);
        let (x, width) = (flow.left(), flow.width());
        flow.body_text(analysis, x, width, BODY_SIZE, palette.text);
    }
    flow.cursor()
}
