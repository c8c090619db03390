//! Table of contents
//!
//! Row height never depends on the printed numbers, so the dry pass with
//! placeholders paginates exactly like the final pass.

use crate::flow::{Cursor, PageFlow};
use crate::font_registry::FontStyle;
use crate::pagination::TocEntry;
use crate::text_encoding::sanitize;
use crate::text_layout::truncate_to_width;

use super::right_aligned_text;

const ROW_HEIGHT: f64 = 24.0;
const ENTRY_SIZE: f64 = 12.0;
const NUMBER_COLUMN: f64 = 40.0;
const PLACEHOLDER: &str = "-";

pub fn render(flow: &mut PageFlow<'_>, entries: &[TocEntry]) -> Cursor {
    let ctx = flow.ctx();
    let regular = *ctx.font(FontStyle::Regular);
    let bold = *ctx.font(FontStyle::Bold);
    let dot_width = regular.width_of(".", ENTRY_SIZE);

    for (i, entry) in entries.iter().enumerate() {
        flow.ensure_space(ROW_HEIGHT);
        let x = flow.left();
        let right = x + flow.width();
        let baseline = flow.y() - ENTRY_SIZE - 4.0;

        let color = if entry.section.is_premium() {
            ctx.palette.primary
        } else {
            ctx.palette.text
        };
        let label = format!("{}.", i + 1);
        let label_width = bold.width_of("00.", ENTRY_SIZE) + 6.0;
        let title_max = flow.width() - label_width - NUMBER_COLUMN - 20.0;
        let title = truncate_to_width(&sanitize(&entry.title), title_max, &regular, ENTRY_SIZE);
        let number = entry
            .page
            .map(|n| n.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let page = flow.page();
        page.draw_text(&label, x, baseline, ENTRY_SIZE, FontStyle::Bold, ctx.palette.primary, None);
        let title_x = x + label_width;
        page.draw_text(&title, title_x, baseline, ENTRY_SIZE, FontStyle::Regular, color, None);

        let leader_start = title_x + regular.width_of(&title, ENTRY_SIZE) + 6.0;
        let leader_end = right - NUMBER_COLUMN;
        let dots = ((leader_end - leader_start) / dot_width).floor();
        if dots > 0.0 {
            page.draw_text(
                &".".repeat(dots as usize),
                leader_start,
                baseline,
                ENTRY_SIZE,
                FontStyle::Regular,
                ctx.palette.medium_gray,
                None,
            );
        }
        right_aligned_text(page, &bold, &number, right, baseline, ENTRY_SIZE, ctx.palette.text);
        flow.advance(ROW_HEIGHT);
    }
    flow.cursor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Section;
    use crate::sections::test_support::with_ctx;

    fn entries(n: usize, page: Option<u32>) -> Vec<TocEntry> {
        (0..n)
            .map(|i| TocEntry {
                section: Section::Summary,
                title: format!("Avsnitt {}", i),
                page,
            })
            .collect()
    }

    #[test]
    fn test_placeholders_and_numbers_take_same_space() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let mut a = PageFlow::new(ctx);
            a.new_page();
            let end_a = render(&mut a, &entries(8, None));
            let mut b = PageFlow::new(ctx);
            b.new_page();
            let end_b = render(&mut b, &entries(8, Some(12)));
            assert_eq!(end_a, end_b);
            assert!(a.pages()[0].contains_text(PLACEHOLDER));
            assert!(b.pages()[0].contains_text("12"));
        });
    }

    #[test]
    fn test_long_toc_paginates() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &entries(40, Some(3)));
            assert_eq!(flow.pages().len(), 2);
            assert!(flow.pages()[1].contains_text("Avsnitt 39"));
        });
    }
}
