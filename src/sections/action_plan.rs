//! Action plan: numbered next steps from missing answers and the score band

use crate::flow::{Cursor, PageFlow};
use crate::scoring::action_steps;
use crate::style::BODY_SIZE;

use super::text_card;

pub fn render(flow: &mut PageFlow<'_>) -> Cursor {
    let ctx = flow.ctx();
    if let Some(text) = ctx.model.narrative_for("action_plan") {
        text_card(
            flow,
            None,
            &[text.to_string()],
            ctx.palette.light_gray,
            ctx.palette.primary,
        );
    }

    let (x, width, color) = (flow.left(), flow.width(), ctx.palette.text);
    for (i, step) in action_steps(ctx.model, ctx.score, ctx.labels).iter().enumerate() {
        flow.numbered_item(&format!("{}.", i + 1), step, x, width, BODY_SIZE, color);
        flow.advance(4.0);
    }
    flow.cursor()
}
