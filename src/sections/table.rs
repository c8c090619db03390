//! Simple data tables
//!
//! Columns share the available width equally. The header row is drawn
//! inverted and repeated at the top of every continuation page; body rows
//! alternate their background by row parity, and untinted rows get a
//! hairline outline. Cells are single-line, left aligned and cut with an
//! ellipsis.

use crate::flow::PageFlow;
use crate::font_registry::FontStyle;
use crate::text_encoding::sanitize;
use crate::text_layout::truncate_to_width;
use crate::types::{Color, Rect};

const ROW_HEIGHT: f64 = 22.0;
const CELL_PADDING: f64 = 6.0;
const TEXT_SIZE: f64 = 9.5;

pub fn draw_table<S: AsRef<str>>(flow: &mut PageFlow<'_>, headers: &[S], rows: &[Vec<String>]) {
    if headers.is_empty() {
        return;
    }
    flow.ensure_space(2.0 * ROW_HEIGHT);
    draw_header(flow, headers);

    for (i, row) in rows.iter().enumerate() {
        if flow.ensure_space(ROW_HEIGHT) {
            draw_header(flow, headers);
        }
        let ctx = flow.ctx();
        let fill = if i % 2 == 1 {
            Some(ctx.palette.light_gray)
        } else {
            None
        };
        draw_row(flow, row.iter().map(String::as_str), headers.len(), fill, ctx.palette.text, FontStyle::Regular);
    }
    flow.advance(12.0);
}

fn draw_header<S: AsRef<str>>(flow: &mut PageFlow<'_>, headers: &[S]) {
    let ctx = flow.ctx();
    draw_row(
        flow,
        headers.iter().map(AsRef::as_ref),
        headers.len(),
        Some(ctx.palette.primary),
        Color::white(),
        FontStyle::Bold,
    );
}

fn draw_row<'r>(
    flow: &mut PageFlow<'_>,
    cells: impl Iterator<Item = &'r str>,
    columns: usize,
    fill: Option<Color>,
    color: Color,
    style: FontStyle,
) {
    let ctx = flow.ctx();
    let font = *ctx.font(style);
    let x = flow.left();
    let width = flow.width();
    let column_width = width / columns as f64;
    let top = flow.y();

    let row = Rect::from_top(x, top, width, ROW_HEIGHT);
    let page = flow.page();
    match fill {
        Some(fill) => page.draw_rect(row, fill, None),
        None => page.stroke_rect(row, ctx.palette.light_gray, 0.5),
    }
    let baseline = top - ROW_HEIGHT / 2.0 - TEXT_SIZE * 0.35;
    for (col, cell) in cells.take(columns).enumerate() {
        let text = truncate_to_width(
            &sanitize(cell),
            column_width - 2.0 * CELL_PADDING,
            &font,
            TEXT_SIZE,
        );
        let cell_x = x + col as f64 * column_width + CELL_PADDING;
        page.draw_text(&text, cell_x, baseline, TEXT_SIZE, style, color, None);
    }
    flow.advance(ROW_HEIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::DrawOp;
    use crate::sections::test_support::with_ctx;

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![format!("rad {}", i), "1000".to_string(), "x".to_string()])
            .collect()
    }

    #[test]
    fn test_zebra_rows_and_inverted_header() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            let before = flow.pages()[0].ops.len();
            draw_table(&mut flow, &["A", "B", "C"], &rows(4));
            let fills: Vec<Color> = flow.pages()[0].ops[before..]
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Rect { style, .. } => style.fill,
                    _ => None,
                })
                .collect();
            // header plus rows 1 and 3
            assert_eq!(fills, vec![ctx.palette.primary, ctx.palette.light_gray, ctx.palette.light_gray]);
            let outlined = flow.pages()[0].ops[before..]
                .iter()
                .filter(|op| matches!(op, DrawOp::Rect { style, .. } if style.fill.is_none()))
                .count();
            assert_eq!(outlined, 2);
            let header = flow.pages()[0].texts().find(|t| t.text == "A").unwrap();
            assert_eq!(header.color, Color::white());
            assert_eq!(header.style, FontStyle::Bold);
        });
    }

    #[test]
    fn test_header_repeats_after_page_break() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            draw_table(&mut flow, &["Kolumn", "B", "C"], &rows(60));
            assert_eq!(flow.pages().len(), 3);
            for page in flow.pages() {
                assert_eq!(page.texts().filter(|t| t.text == "Kolumn").count(), 1);
            }
            assert!(flow.pages()[2].contains_text("rad 59"));
        });
    }

    #[test]
    fn test_cells_are_truncated_to_column() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            let long = vec![vec!["Ett mycket långt cellinnehåll som aldrig får plats i sin kolumn".to_string(); 5]];
            draw_table(&mut flow, &["A", "B", "C", "D", "E"], &long);
            let column = flow.width() / 5.0;
            for text in flow.pages()[0].texts().filter(|t| t.text.ends_with('…')) {
                assert!(ctx.fonts.regular.width_of(&text.text, TEXT_SIZE) <= column - 2.0 * CELL_PADDING);
            }
            assert_eq!(flow.pages()[0].texts().filter(|t| t.text.ends_with('…')).count(), 5);
        });
    }
}
