use investor_report_pdf::{assemble, ReportConfig, ReportError, ReportModel};

fn model(json: &str) -> ReportModel {
    ReportModel::from_json_str(json).unwrap()
}

#[test]
fn rejects_missing_score() {
    let result = assemble(&model(r#"{"companyName": "Utan Poäng AB"}"#), &ReportConfig::default());
    assert!(matches!(result, Err(ReportError::MissingScore)));
}

#[test]
fn rejects_out_of_range_score() {
    let result = assemble(&model(r#"{"score": 140}"#), &ReportConfig::default());
    assert!(matches!(result, Err(ReportError::ScoreOutOfRange(140))));

    let result = assemble(&model(r#"{"score": -1}"#), &ReportConfig::default());
    assert!(matches!(result, Err(ReportError::ScoreOutOfRange(-1))));
}

#[test]
fn accepts_score_bounds() {
    for score in [0, 100] {
        let json = format!(r#"{{"score": {}}}"#, score);
        assert!(assemble(&model(&json), &ReportConfig::default()).is_ok());
    }
}

#[test]
fn unknown_font_family_is_a_font_error() {
    let config = ReportConfig::from_json_str(r#"{"font_family": "Comic Sans"}"#).unwrap();
    let result = assemble(&model(r#"{"score": 50}"#), &config);
    assert!(matches!(result, Err(ReportError::Font(_))));
}

#[test]
fn produces_pdf_bytes() {
    let report = assemble(
        &model(r#"{"score": 82, "companyName": "Solkraft AB", "answers": {"team": "Två grundare"}}"#),
        &ReportConfig::default(),
    )
    .unwrap();
    assert_eq!(report.mime_type, "application/pdf");
    assert!(report.bytes.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&report.bytes).trim_end().ends_with("%%EOF"));
    assert_eq!(report.filename, "affarsanalys-solkraft-ab.pdf");
}

#[test]
fn english_premium_filename() {
    let config = ReportConfig::from_json_str(r#"{"locale": "en"}"#).unwrap();
    let report = assemble(
        &model(r#"{"score": 91, "companyName": "Nordic Grid", "subscriptionLevel": "premium"}"#),
        &config,
    )
    .unwrap();
    assert_eq!(report.filename, "business-analysis-nordic-grid-premium.pdf");
}

#[test]
fn uncompressed_output_carries_page_stamps() {
    let config = ReportConfig::from_json_str(r#"{"compress": false}"#).unwrap();
    let report = assemble(&model(r#"{"score": 66, "companyName": "Solkraft AB"}"#), &config).unwrap();
    let text = String::from_utf8_lossy(&report.bytes);
    assert!(text.contains("(Sida 1 av "));
    assert!(text.contains("/Author (Solkraft AB)"));
}
