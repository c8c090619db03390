//! SWOT analysis as a fixed 2x2 grid
//!
//! Quadrant boxes have a fixed size. Long content is cut to four items
//! per quadrant and two lines per item instead of growing the box.

use log::warn;

use crate::flow::{Cursor, PageFlow};
use crate::font_registry::FontStyle;
use crate::model::Swot;
use crate::style::{line_height, CARD_PADDING, CARD_RADIUS, SUBHEADING_SIZE};
use crate::text_encoding::sanitize;
use crate::text_layout::{truncate_to_width, wrap};
use crate::types::{Color, Rect};

pub const MAX_ITEMS: usize = 4;
const MAX_LINES_PER_ITEM: usize = 2;
const ITEM_SIZE: f64 = 10.0;
const GRID_GAP: f64 = 12.0;
const ITEM_INDENT: f64 = 12.0;

fn quadrant_height() -> f64 {
    2.0 * CARD_PADDING
        + line_height(SUBHEADING_SIZE)
        + (MAX_ITEMS * MAX_LINES_PER_ITEM) as f64 * line_height(ITEM_SIZE)
        + MAX_ITEMS as f64 * 2.0
}

pub fn render(flow: &mut PageFlow<'_>, swot: &Swot) -> Cursor {
    let ctx = flow.ctx();
    let palette = ctx.palette;
    let titles = ctx.labels.swot_quadrants;
    let quadrants: [(&str, &[String], Color); 4] = [
        (titles[0], &swot.strengths, palette.success),
        (titles[1], &swot.weaknesses, palette.danger),
        (titles[2], &swot.opportunities, palette.primary),
        (titles[3], &swot.threats, palette.warning),
    ];

    let width = (flow.width() - GRID_GAP) / 2.0;
    let height = quadrant_height();
    flow.ensure_space(2.0 * height + GRID_GAP);

    let origin_x = flow.left();
    let top = flow.y();
    for (i, (title, items, accent)) in quadrants.into_iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        let rect = Rect::from_top(
            origin_x + col * (width + GRID_GAP),
            top - row * (height + GRID_GAP),
            width,
            height,
        );
        draw_quadrant(flow, rect, title, items, accent);
    }
    flow.advance(2.0 * height + GRID_GAP + 10.0);
    flow.cursor()
}

fn draw_quadrant(flow: &mut PageFlow<'_>, rect: Rect, title: &str, items: &[String], accent: Color) {
    let ctx = flow.ctx();
    let regular = ctx.fonts.regular;
    let text_width = rect.width - 2.0 * CARD_PADDING - ITEM_INDENT;
    if items.len() > MAX_ITEMS {
        warn!(
            "SWOT quadrant '{}' has {} items, showing the first {}",
            title,
            items.len(),
            MAX_ITEMS
        );
    }

    let page = flow.page();
    page.draw_round_rect(rect, CARD_RADIUS, accent.tint(0.9), None);
    page.draw_rect(Rect::new(rect.x, rect.top() - 4.0, rect.width, 4.0), accent, None);

    let x = rect.x + CARD_PADDING;
    let mut y = rect.top() - CARD_PADDING;
    page.draw_text(title, x, y - SUBHEADING_SIZE, SUBHEADING_SIZE, FontStyle::Bold, accent, None);
    y -= line_height(SUBHEADING_SIZE);

    if items.is_empty() {
        page.draw_text(
            ctx.labels.none_identified,
            x,
            y - ITEM_SIZE,
            ITEM_SIZE,
            FontStyle::Oblique,
            ctx.palette.medium_gray,
            None,
        );
        return;
    }

    for item in items.iter().take(MAX_ITEMS) {
        let mut lines = wrap(&sanitize(item), text_width, &regular, ITEM_SIZE);
        if lines.len() > MAX_LINES_PER_ITEM {
            let rest = lines[MAX_LINES_PER_ITEM - 1..].join(" ");
            lines.truncate(MAX_LINES_PER_ITEM - 1);
            lines.push(format!("{}…", rest));
        }
        page.draw_circle(x + 3.0, y - ITEM_SIZE * 0.65, 1.8, accent, None);
        for line in &lines {
            // a single overlong word still has to stay inside the box
            let line = truncate_to_width(line, text_width, &regular, ITEM_SIZE);
            page.draw_text(
                &line,
                x + ITEM_INDENT,
                y - ITEM_SIZE,
                ITEM_SIZE,
                FontStyle::Regular,
                ctx.palette.text,
                None,
            );
            y -= line_height(ITEM_SIZE);
        }
        y -= 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::with_ctx;

    fn items(prefix: &str) -> Vec<String> {
        (1..=5).map(|i| format!("{} punkt {}", prefix, i)).collect()
    }

    #[test]
    fn test_quadrants_capped_at_four_items() {
        with_ctx(r#"{"score": 80}"#, |ctx| {
            let swot = Swot {
                strengths: items("Styrka"),
                weaknesses: items("Svaghet"),
                opportunities: items("Möjlighet"),
                threats: items("Hot"),
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &swot);
            let page = &flow.pages()[0];
            for prefix in ["Styrka", "Svaghet", "Möjlighet", "Hot"] {
                for i in 1..=4 {
                    assert!(page.contains_text(&format!("{} punkt {}", prefix, i)));
                }
                assert!(!page.contains_text(&format!("{} punkt 5", prefix)));
            }
        });
    }

    #[test]
    fn test_long_items_limited_to_two_lines() {
        with_ctx(r#"{"score": 80}"#, |ctx| {
            let swot = Swot {
                strengths: vec!["mycket lång text ".repeat(30)],
                ..Swot::default()
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &swot);
            let lines: Vec<_> = flow.pages()[0]
                .texts()
                .filter(|t| t.text.contains("lång"))
                .collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[1].text.ends_with('…'));
            assert!(flow.pages()[0].contains_text("Inga identifierade"));
        });
    }

    #[test]
    fn test_overlong_word_stays_inside_quadrant() {
        with_ctx(r#"{"score": 80}"#, |ctx| {
            let word = "https://example.com/".to_string() + &"x".repeat(80);
            let swot = Swot {
                strengths: vec![word],
                ..Swot::default()
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            let quadrant_right = flow.left() + (flow.width() - GRID_GAP) / 2.0;
            render(&mut flow, &swot);
            let item = flow.pages()[0]
                .texts()
                .find(|t| t.text.starts_with("https"))
                .unwrap();
            assert!(item.text.ends_with('…'));
            let right = item.x + ctx.fonts.regular.width_of(&item.text, item.size);
            assert!(right <= quadrant_right - CARD_PADDING + 1e-6);
        });
    }

    #[test]
    fn test_grid_fits_on_one_page() {
        with_ctx(r#"{"score": 80}"#, |ctx| {
            let flow = PageFlow::new(ctx);
            assert!(2.0 * quadrant_height() + GRID_GAP < flow.full_capacity());
        });
    }
}
