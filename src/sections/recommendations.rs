//! Detailed recommendations grouped by time horizon

use crate::flow::{Cursor, PageFlow};
use crate::model::{DetailedRecommendations, Recommendation};

use super::{or_placeholder, text_card};

pub fn render(flow: &mut PageFlow<'_>, recommendations: &DetailedRecommendations) -> Cursor {
    let ctx = flow.ctx();
    let groups = [
        &recommendations.immediate,
        &recommendations.short_term,
        &recommendations.long_term,
    ];
    for (title, items) in ctx.labels.horizons.iter().zip(groups) {
        if items.is_empty() {
            continue;
        }
        flow.subheading(title);
        for item in items {
            let paragraphs = fields(ctx.labels.recommendation_fields, item);
            let action = or_placeholder(flow, Some(item.action.as_str()));
            text_card(
                flow,
                Some(action.as_str()),
                &paragraphs,
                ctx.palette.light_gray,
                ctx.palette.secondary,
            );
        }
        flow.advance(4.0);
    }
    flow.cursor()
}

/// One `**Label:** value` paragraph per filled field
fn fields(names: [&str; 5], item: &Recommendation) -> Vec<String> {
    let values = [
        &item.why,
        &item.how,
        &item.impact,
        &item.resources,
        &item.timeline,
    ];
    names
        .iter()
        .zip(values)
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| format!("**{}:** {}", name, v))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::with_ctx;

    fn recommendation(action: &str) -> Recommendation {
        Recommendation {
            action: action.to_string(),
            why: Some("Kunderna efterfrågar det".into()),
            how: None,
            impact: Some("  ".into()),
            resources: None,
            timeline: Some("Q3".into()),
        }
    }

    #[test]
    fn test_only_filled_fields() {
        let item = recommendation("Anställ säljare");
        let lines = fields(["Why", "How", "Impact", "Resources", "Timeline"], &item);
        assert_eq!(lines, vec!["**Why:** Kunderna efterfrågar det", "**Timeline:** Q3"]);
    }

    #[test]
    fn test_groups_by_horizon() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let recommendations = DetailedRecommendations {
                immediate: vec![recommendation("Anställ säljare")],
                long_term: vec![recommendation("Expandera till Norge")],
                ..DetailedRecommendations::default()
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &recommendations);
            let page = &flow.pages()[0];
            assert!(page.contains_text("Omedelbart"));
            assert!(!page.contains_text("Kort sikt"));
            assert!(page.contains_text("Lång sikt"));
            assert!(page.contains_text("Expandera till Norge"));
            assert!(page.contains_text("Tidslinje:"));
        });
    }
}
