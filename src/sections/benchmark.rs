//! Benchmarks: industry metric comparison and peer companies

use crate::flow::{Cursor, PageFlow};
use crate::font_registry::FontStyle;
use crate::model::{BenchmarkAnalysis, Scalar};
use crate::style::BODY_SIZE;

use super::or_placeholder;
use super::table::draw_table;

pub fn render(flow: &mut PageFlow<'_>, analysis: &BenchmarkAnalysis) -> Cursor {
    let ctx = flow.ctx();
    let labels = ctx.labels;

    if let Some(comparison) = analysis
        .industry_comparison
        .as_ref()
        .filter(|c| !c.metrics.is_empty())
    {
        if let Some(basis) = comparison.metric.as_deref().filter(|m| !m.trim().is_empty()) {
            let (x, width) = (flow.left(), flow.width());
            flow.paragraph(basis, x, width, BODY_SIZE, FontStyle::Oblique, ctx.palette.medium_gray);
            flow.advance(6.0);
        }
        let rows: Vec<Vec<String>> = comparison
            .metrics
            .iter()
            .map(|(name, metric)| {
                vec![
                    humanize(name),
                    metric.us.to_string(),
                    metric.industry.to_string(),
                    metric.verdict.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        draw_table(flow, &labels.benchmark_headers, &rows);
    }

    if !analysis.peer_comparison.is_empty() {
        flow.subheading(labels.peer_headers[0]);
        let rows: Vec<Vec<String>> = analysis
            .peer_comparison
            .iter()
            .map(|peer| {
                vec![
                    or_placeholder(flow, Some(peer.company.as_str())),
                    optional(&peer.funding),
                    optional(&peer.revenue),
                    optional(&peer.valuation),
                ]
            })
            .collect();
        draw_table(flow, &labels.peer_headers, &rows);
    }
    flow.cursor()
}

/// `customer_growth` / `customerGrowth` to "Customer growth"
fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch == '_' || ch == '-' {
            out.push(' ');
        } else if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn optional(value: &Option<Scalar>) -> String {
    value
        .as_ref()
        .map(Scalar::to_string)
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReportModel;
    use crate::sections::test_support::with_ctx;

    #[test]
    fn test_humanize_keys() {
        assert_eq!(humanize("customer_growth"), "Customer growth");
        assert_eq!(humanize("grossMargin"), "Gross margin");
        assert_eq!(humanize("cac"), "Cac");
    }

    #[test]
    fn test_industry_and_peer_tables() {
        let model = ReportModel::from_json_str(
            r#"{"score": 80, "premiumAnalysis": {"benchmarkAnalysis": {
                "industryComparison": {
                    "metric": "Jämfört med nordiska SaaS-bolag",
                    "growth": {"us": "40%", "industry": "25%", "verdict": "Bättre"}
                },
                "peerComparison": [{"company": "Konkurrent AB", "funding": 5000000}]
            }}}"#,
        )
        .unwrap();
        let analysis = model.premium().unwrap().benchmark_analysis.unwrap();

        with_ctx(r#"{"score": 80}"#, |ctx| {
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &analysis);
            let page = &flow.pages()[0];
            assert!(page.contains_text("Jämfört med nordiska SaaS-bolag"));
            assert!(page.contains_text("Growth"));
            assert!(page.contains_text("Bättre"));
            assert!(page.contains_text("Branschen"));
            assert!(page.contains_text("Konkurrent AB"));
            assert!(page.contains_text("5000000"));
        });
    }
}
