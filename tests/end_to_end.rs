//! End-to-end layout scenarios through the public API

use investor_report_pdf::page::{Page, PageKind};
use investor_report_pdf::plan::NarrativeKind;
use investor_report_pdf::{layout_report, LaidOutReport, ReportConfig, ReportModel, Section};

const SCENARIO_A: &str = r#"{
    "score": 82,
    "companyName": "Solkraft AB",
    "generatedOn": "2024-05-20",
    "answers": {
        "customer_problem": "Små fastighetsägare saknar överblick över sin energianvändning.",
        "solution": "En app som kopplar upp befintliga elmätare och ger konkreta besparingsförslag.",
        "market_size": "Cirka 400 000 småhus i Sverige.",
        "team": "Två grundare med bakgrund inom energibranschen och mjukvaruutveckling.",
        "traction": "120 betalande kunder i pilotområdet.",
        "revenue_block": "Månadsabonnemang 99 kr per hushåll.",
        "runway": 18
    }
}"#;

fn swot_items(prefix: &str) -> String {
    let items: Vec<String> = (1..=5).map(|i| format!("\"{} {}\"", prefix, i)).collect();
    format!("[{}]", items.join(", "))
}

fn scenario_b() -> String {
    let base = SCENARIO_A.trim_end().trim_end_matches('}');
    format!(
        r#"{}, "premiumAnalysis": {{"swot": {{
            "strengths": {},
            "weaknesses": {},
            "opportunities": {},
            "threats": {}
        }}}}}}"#,
        base,
        swot_items("Styrka"),
        swot_items("Svaghet"),
        swot_items("Möjlighet"),
        swot_items("Hot")
    )
}

fn layout(json: &str) -> LaidOutReport {
    let model = ReportModel::from_json_str(json).unwrap();
    layout_report(&model, &ReportConfig::default()).unwrap()
}

fn section_page(report: &LaidOutReport, section: Section) -> &Page {
    let anchor = report
        .anchors
        .iter()
        .find(|a| a.section == section)
        .unwrap_or_else(|| panic!("no anchor for {:?}", section));
    &report.pages[anchor.page_index]
}

#[test]
fn scenario_a_lists_ten_standard_sections() {
    let report = layout(SCENARIO_A);
    assert!(report.page_count() > 2);
    assert_eq!(
        report.toc_titles(),
        vec![
            "Sammanfattning",
            "Poängfördelning",
            "Problem & lösning",
            "Marknad",
            "Affärsmodell",
            "Team",
            "Traktion & milstolpar",
            "Finansiering",
            "Risker & strategi",
            "Handlingsplan",
        ]
    );
    assert!(report.toc.iter().all(|entry| !entry.section.is_premium()));
    assert!(report.sections.iter().all(|s| !s.is_premium()));
}

#[test]
fn scenario_a_toc_numbers_match_headings() {
    let report = layout(SCENARIO_A);
    for entry in &report.toc {
        let page = entry.page.expect("every TOC entry is numbered");
        assert_eq!(report.page_of(entry.section), Some(page), "{}", entry.title);
    }
    // the TOC opens the first body page, right after the cover
    let toc_page = report
        .pages
        .iter()
        .find(|p| p.kind == PageKind::Body)
        .unwrap();
    assert!(toc_page.contains_text("Innehåll"));
    assert!(toc_page.contains_text("Handlingsplan"));
    assert!(!toc_page.texts().any(|t| t.text == "-"));
}

#[test]
fn scenario_a_runway_in_both_sections() {
    let report = layout(SCENARIO_A);
    let financials = section_page(&report, Section::Narrative(NarrativeKind::Financials));
    assert!(financials.contains_text("18 månader"));
    let mentions: usize = report
        .pages
        .iter()
        .map(|p| p.texts().filter(|t| t.text.contains("18 månader")).count())
        .sum();
    assert_eq!(mentions, 2);
}

#[test]
fn scenario_b_swot_capped_at_four_per_quadrant() {
    let report = layout(&scenario_b());
    assert!(report.toc_titles().contains(&"SWOT-analys"));
    assert_eq!(report.toc.last().map(|e| e.section), Some(Section::Swot));

    let page = section_page(&report, Section::Swot);
    for prefix in ["Styrka", "Svaghet", "Möjlighet", "Hot"] {
        let item = format!("{} ", prefix);
        let shown = page.texts().filter(|t| t.text.starts_with(&item)).count();
        assert_eq!(shown, 4, "{}", prefix);
        assert!(!page.contains_text(&format!("{} 5", prefix)));
    }
}

#[test]
fn malformed_milestones_render_as_text() {
    let report = layout(r#"{"score": 64, "answers": {"milestones": "not valid structured data"}}"#);
    let page = section_page(&report, Section::Narrative(NarrativeKind::Traction));
    assert!(page.contains_text("not valid structured data"));
}

#[test]
fn page_numbers_cover_every_body_page() {
    let report = layout(&scenario_b());
    let cover = &report.pages[0];
    assert_eq!(cover.kind, PageKind::Cover);
    assert_eq!(cover.number, None);
    assert!(!cover.contains_text("Sida "));

    let total = report.page_count() - 1;
    for (i, page) in report.pages.iter().enumerate().skip(1) {
        assert_eq!(page.kind, PageKind::Body);
        assert_eq!(page.number, Some(i as u32));
        let stamp = format!("Sida {} av {}", i, total);
        assert_eq!(page.texts().filter(|t| t.text == stamp).count(), 1);
    }
}

#[test]
fn no_premium_payload_means_no_premium_sections() {
    let report = layout(r#"{"score": 70, "answers": {"team": "Tre grundare"}}"#);
    assert!(report.sections.iter().all(|s| !s.is_premium()));
    for page in &report.pages {
        for title in ["SWOT-analys", "Finansiella prognoser", "Investeringsförslag", "Filmmanus"] {
            assert!(!page.contains_text(title));
        }
    }
}

#[test]
fn empty_premium_parts_are_omitted() {
    let report = layout(
        r#"{"score": 90, "subscriptionLevel": "premium", "premiumAnalysis": {
            "swot": {"strengths": [], "weaknesses": [], "opportunities": [], "threats": []},
            "riskMitigation": {"identifiedRisks": [{"risk": "Regulatorisk osäkerhet"}]}
        }}"#,
    );
    assert!(!report.sections.contains(&Section::Swot));
    assert!(report.sections.contains(&Section::RiskMatrix));
    let page = section_page(&report, Section::RiskMatrix);
    assert!(page.contains_text("Regulatorisk osäkerhet"));
}

#[test]
fn malformed_optional_data_still_renders() {
    let report = layout(
        r#"{
            "score": 77,
            "companyName": "Solkraft AB",
            "subscriptionLevel": "enterprise",
            "generatedOn": "snart",
            "premiumAnalysis": {
                "swot": "not an object",
                "detailedRecommendations": {"immediate": [{"why": "Kassaflödet är svagt"}]},
                "imagePrompts": [{"title": "Hero"}, 42]
            }
        }"#,
    );
    assert!(!report.sections.contains(&Section::Swot));
    assert!(report.sections.contains(&Section::ImagePrompts));

    let page = section_page(&report, Section::Recommendations);
    assert!(page.contains_text("Kassaflödet är svagt"));
    // the missing action becomes the card title placeholder
    assert!(page.texts().any(|t| t.text == "Ej angivet"));
}

#[test]
fn english_locale_labels() {
    let model = ReportModel::from_json_str(SCENARIO_A).unwrap();
    let config = ReportConfig::from_json_str(r#"{"locale": "en"}"#).unwrap();
    let report = layout_report(&model, &config).unwrap();
    assert_eq!(report.toc_titles()[0], "Executive summary");
    let last = report.pages.last().unwrap();
    let total = report.page_count() - 1;
    assert!(last.contains_text(&format!("Page {} of {}", total, total)));
}
