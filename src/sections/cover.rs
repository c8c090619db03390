//! Cover page: brand band, logo, title block and score badge

use crate::flow::{Cursor, PageFlow};
use crate::scoring::ScoreBand;
use crate::style::{COVER_TITLE_SIZE, SMALL_SIZE};
use crate::text_encoding::sanitize;
use crate::text_layout::{truncate_to_width, wrap};
use crate::types::{Color, Rect};

use super::{band_color, centered_text};

const BAND_HEIGHT: f64 = 330.0;
const LOGO_HEIGHT: f64 = 60.0;
const LOGO_MAX_WIDTH: f64 = 220.0;
const RING_RADIUS: f64 = 72.0;

pub fn render(flow: &mut PageFlow<'_>) -> Cursor {
    let ctx = flow.ctx();
    let layout = ctx.layout;
    let palette = ctx.palette;
    let labels = ctx.labels;
    let fonts = ctx.fonts;
    let cx = layout.page_width / 2.0;
    let top = layout.page_height;
    let text_width = layout.content_width();

    let page = flow.page();
    let band = Rect::from_top(0.0, top, layout.page_width, BAND_HEIGHT);
    page.draw_rect(band, palette.cover_band, None);
    page.draw_rect(
        Rect::new(0.0, band.bottom() - 4.0, layout.page_width, 4.0),
        palette.secondary,
        None,
    );

    let mut y = top - 50.0;
    if let Some(logo) = ctx.logo {
        let width = (LOGO_HEIGHT * logo.aspect).min(LOGO_MAX_WIDTH);
        let height = width / logo.aspect;
        page.draw_image(logo.image, Rect::from_top(cx - width / 2.0, y, width, height));
        y -= height + 30.0;
    } else {
        y -= 40.0;
    }

    y -= COVER_TITLE_SIZE;
    centered_text(page, &fonts.bold, &ctx.title, cx, y, COVER_TITLE_SIZE, Color::white(), None);
    y -= 26.0;
    centered_text(
        page,
        &fonts.regular,
        labels.report_subtitle,
        cx,
        y,
        13.0,
        palette.secondary,
        None,
    );

    y -= 44.0;
    let company = truncate_to_width(&sanitize(&ctx.company()), text_width, &fonts.bold, 22.0);
    centered_text(page, &fonts.bold, &company, cx, y, 22.0, Color::white(), None);
    y -= 24.0;
    let date = format!("{}: {}", labels.date_label, ctx.date.format("%Y-%m-%d"));
    centered_text(page, &fonts.regular, &date, cx, y, 11.0, Color::white(), Some(0.8));

    if ctx.model.is_premium_tier() {
        let badge_width = fonts.bold.width_of(labels.premium_badge, 10.0) + 24.0;
        let badge = Rect::from_top(
            layout.page_width - layout.margin_right - badge_width,
            top - 24.0,
            badge_width,
            22.0,
        );
        page.draw_round_rect(badge, 11.0, palette.warning, None);
        centered_text(
            page,
            &fonts.bold,
            labels.premium_badge,
            badge.center_x(),
            badge.y + 7.0,
            10.0,
            Color::white(),
            None,
        );
    }

    draw_score_badge(flow, ctx.band);
    flow.cursor()
}

/// Ring with the score, "/100", the band label and its explanation
fn draw_score_badge(flow: &mut PageFlow<'_>, band: ScoreBand) {
    let ctx = flow.ctx();
    let layout = ctx.layout;
    let fonts = ctx.fonts;
    let palette = ctx.palette;
    let color = band_color(band, &palette);
    let cx = layout.page_width / 2.0;
    let cy = layout.page_height - BAND_HEIGHT - 40.0 - RING_RADIUS;

    let page = flow.page();
    centered_text(
        page,
        &fonts.regular,
        ctx.labels.score_caption,
        cx,
        cy + RING_RADIUS + 14.0,
        SMALL_SIZE + 1.0,
        palette.medium_gray,
        None,
    );
    page.draw_circle(cx, cy, RING_RADIUS, color.tint(0.88), None);
    page.draw_ring(cx, cy, RING_RADIUS, color, 8.0);

    let number = ctx.score.value().to_string();
    let number_size = 48.0;
    let cap = fonts.bold.cap_height(number_size);
    centered_text(page, &fonts.bold, &number, cx, cy - cap / 2.0 + 8.0, number_size, color, None);
    centered_text(
        page,
        &fonts.regular,
        "/100",
        cx,
        cy - cap / 2.0 - 14.0,
        12.0,
        palette.medium_gray,
        None,
    );

    let mut y = cy - RING_RADIUS - 34.0;
    centered_text(
        page,
        &fonts.bold,
        ctx.labels.band_label(band),
        cx,
        y,
        18.0,
        color,
        None,
    );
    y -= 22.0;
    for line in wrap(
        ctx.labels.band_explanation(band),
        layout.content_width() - 60.0,
        &fonts.regular,
        11.0,
    ) {
        centered_text(page, &fonts.regular, &line, cx, y, 11.0, palette.text, None);
        y -= 16.0;
    }

    page.draw_line(
        (layout.margin_left, y - 10.0),
        (layout.page_width - layout.margin_right, y - 10.0),
        palette.light_gray,
        1.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{DrawOp, PageKind};
    use crate::sections::test_support::with_ctx;

    fn cover(json: &str, check: impl FnOnce(&crate::page::Page)) {
        with_ctx(json, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.cover_page();
            render(&mut flow);
            assert_eq!(flow.pages().len(), 1);
            assert_eq!(flow.pages()[0].kind, PageKind::Cover);
            check(&flow.pages()[0]);
        });
    }

    #[test]
    fn test_cover_shows_score_and_label() {
        cover(
            r#"{"score": 87, "companyName": "Norrsken AB", "generatedOn": "2024-03-05"}"#,
            |page| {
                assert!(page.contains_text("87"));
                assert!(page.contains_text("/100"));
                assert!(page.contains_text("Mycket stark"));
                assert!(page.contains_text("Norrsken AB"));
                assert!(page.contains_text("2024-03-05"));
                assert!(!page.contains_text("PREMIUM"));
            },
        );
    }

    #[test]
    fn test_cover_placeholder_and_premium_badge() {
        cover(r#"{"score": 30, "subscriptionLevel": "platinum"}"#, |page| {
            assert!(page.contains_text("Ej angivet"));
            assert!(page.contains_text("PREMIUM"));
            assert!(page.contains_text("Tidig fas"));
        });
    }

    #[test]
    fn test_cover_has_ring() {
        cover(r#"{"score": 75}"#, |page| {
            let rings = page
                .ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Circle { style, .. } if style.stroke.is_some()))
                .count();
            assert_eq!(rings, 1);
        });
    }
}
