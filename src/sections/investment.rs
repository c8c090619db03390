//! Investment proposal: ask and valuation cards, fund use, key metrics

use std::collections::BTreeMap;

use crate::flow::{Cursor, PageFlow};
use crate::model::{InvestmentProposal, Scalar};

use super::{labeled_value, metric_row, titled_list};

pub fn render(flow: &mut PageFlow<'_>, proposal: &InvestmentProposal) -> Cursor {
    let ctx = flow.ctx();
    let labels = ctx.labels;
    let palette = ctx.palette;

    let cards: Vec<(String, String, _)> = [
        (labels.ask, &proposal.ask_amount, palette.primary),
        (labels.valuation, &proposal.valuation, palette.secondary),
    ]
    .into_iter()
    .filter_map(|(label, value, accent)| {
        value
            .as_ref()
            .map(|v| (label.to_string(), v.to_string(), accent))
    })
    .collect();
    metric_row(flow, &cards);

    keyed_values(flow, labels.use_of_funds, &proposal.use_of_funds);
    keyed_values(flow, labels.key_metrics, &proposal.key_metrics);
    titled_list(flow, labels.investor_benefits, &proposal.investor_benefits);
    flow.cursor()
}

fn keyed_values(flow: &mut PageFlow<'_>, title: &str, values: &BTreeMap<String, Scalar>) {
    if values.is_empty() {
        return;
    }
    flow.subheading(title);
    for (key, value) in values {
        labeled_value(flow, key, &value.to_string());
    }
    flow.advance(8.0);
}
