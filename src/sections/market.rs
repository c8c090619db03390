//! Market insights: trends, opportunities and threats as bullet lists

use crate::flow::{Cursor, PageFlow};
use crate::model::MarketInsights;

use super::titled_list;

pub fn render(flow: &mut PageFlow<'_>, insights: &MarketInsights) -> Cursor {
    let labels = flow.ctx().labels;
    titled_list(flow, labels.trends, &insights.trends);
    titled_list(flow, labels.opportunities, &insights.opportunities);
    titled_list(flow, labels.threats, &insights.threats);
    flow.cursor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::with_ctx;

    #[test]
    fn test_empty_lists_are_skipped() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let insights = MarketInsights {
                trends: vec!["AI-driven automation".into(), "Hållbarhetskrav".into()],
                threats: vec!["Nya regelverk".into()],
                ..MarketInsights::default()
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &insights);
            let page = &flow.pages()[0];
            assert!(page.contains_text("Trender"));
            assert!(page.contains_text("Hållbarhetskrav"));
            assert!(page.contains_text("Hot"));
            assert!(!page.contains_text("Möjligheter"));
        });
    }
}
