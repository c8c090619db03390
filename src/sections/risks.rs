//! Risk matrix: one card per identified risk
//!
//! Risk descriptions and mitigations are prose, so each risk gets a card
//! with wrapped fields instead of a row of narrow table cells.

use crate::flow::{Cursor, PageFlow};
use crate::model::{IdentifiedRisk, RiskMitigation};

use super::{or_placeholder, text_card};

pub fn render(flow: &mut PageFlow<'_>, mitigation: &RiskMitigation) -> Cursor {
    let ctx = flow.ctx();
    for risk in &mitigation.identified_risks {
        let paragraphs = risk_lines(flow, risk);
        text_card(
            flow,
            None,
            &paragraphs,
            ctx.palette.danger.tint(0.9),
            ctx.palette.danger,
        );
    }
    flow.cursor()
}

/// Bold risk statement followed by `**Label:** value` lines
fn risk_lines(flow: &PageFlow<'_>, risk: &IdentifiedRisk) -> Vec<String> {
    let [_, probability, impact, mitigation, status] = flow.ctx().labels.risk_headers;
    let mut lines = vec![format!("**{}**", or_placeholder(flow, Some(risk.risk.as_str())))];
    for (label, value) in [
        (probability, &risk.probability),
        (impact, &risk.impact),
        (mitigation, &risk.mitigation),
        (status, &risk.status),
    ] {
        lines.push(format!("**{}:** {}", label, or_placeholder(flow, value.as_deref())));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::with_ctx;

    fn risk(text: &str) -> IdentifiedRisk {
        IdentifiedRisk {
            risk: text.into(),
            probability: Some("Hög".into()),
            impact: None,
            mitigation: None,
            status: None,
        }
    }

    #[test]
    fn test_missing_fields_use_placeholder() {
        with_ctx(r#"{"score": 70, "companyName": "Testbolag AB"}"#, |ctx| {
            let mitigation = RiskMitigation {
                identified_risks: vec![risk("Nyckelperson")],
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &mitigation);
            let page = &flow.pages()[0];
            assert!(page.contains_text("Sannolikhet:"));
            assert!(page.contains_text("Nyckelperson"));
            assert!(page.contains_text("Hög"));
            assert_eq!(page.texts().filter(|t| t.text.trim() == "Ej angivet").count(), 3);
        });
    }

    #[test]
    fn test_long_risk_text_wraps_instead_of_truncating() {
        with_ctx(r#"{"score": 70, "companyName": "Testbolag AB"}"#, |ctx| {
            let long = "Regulatorisk osäkerhet kring nya EU-krav på energidata kan försena lanseringen \
                        i flera marknader och kräva omfattande anpassningar av plattformen";
            let mitigation = RiskMitigation {
                identified_risks: vec![risk(long), risk("")],
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &mitigation);
            let page = &flow.pages()[0];
            assert!(page.contains_text("Regulatorisk osäkerhet"));
            assert!(page.contains_text("plattformen"));
            assert!(!page.texts().any(|t| t.text.ends_with('…')));
            // blank risk statement falls back to the placeholder
            assert_eq!(page.texts().filter(|t| t.text.trim() == "Ej angivet").count(), 7);
        });
    }
}
