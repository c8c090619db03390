//! Financial projections table, one row per year

use crate::flow::{Cursor, PageFlow};
use crate::model::{FinancialProjections, Scalar};

use super::table::draw_table;

pub fn render(flow: &mut PageFlow<'_>, projections: &FinancialProjections) -> Cursor {
    let headers = flow.ctx().labels.projection_headers;
    let rows: Vec<Vec<String>> = projections
        .iter()
        .map(|(year, row)| {
            vec![
                year_label(year, headers[0]),
                cell(&row.revenue),
                cell(&row.costs),
                cell(&row.ebitda),
                cell(&row.customers),
            ]
        })
        .collect();
    draw_table(flow, &headers, &rows);
    flow.cursor()
}

/// `year1` reads as "År 1"; any other key is shown as given
fn year_label(key: &str, year_word: &str) -> String {
    let digits = key.trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '_');
    if key.to_ascii_lowercase().starts_with("year")
        && !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
    {
        format!("{} {}", year_word, digits)
    } else {
        key.to_string()
    }
}

fn cell(value: &Option<Scalar>) -> String {
    value
        .as_ref()
        .map(Scalar::to_string)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectionRow;
    use crate::sections::test_support::with_ctx;

    #[test]
    fn test_year_labels() {
        assert_eq!(year_label("year1", "År"), "År 1");
        assert_eq!(year_label("Year_3", "Year"), "Year 3");
        assert_eq!(year_label("2026", "År"), "2026");
        assert_eq!(year_label("yearly", "År"), "yearly");
    }

    #[test]
    fn test_rows_with_missing_values() {
        with_ctx(r#"{"score": 75}"#, |ctx| {
            let mut projections = FinancialProjections::new();
            projections.insert(
                "year1".into(),
                ProjectionRow {
                    revenue: Some(Scalar::Number(1200000.0)),
                    customers: Some(Scalar::Text("40".into())),
                    ..ProjectionRow::default()
                },
            );
            projections.insert("year2".into(), ProjectionRow::default());

            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &projections);
            let page = &flow.pages()[0];
            assert!(page.contains_text("Intäkter"));
            assert!(page.contains_text("År 1"));
            assert!(page.contains_text("År 2"));
            assert!(page.contains_text("1200000"));
            assert_eq!(page.texts().filter(|t| t.text == "-").count(), 6);
        });
    }
}
