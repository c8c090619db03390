//! Document assembler: the top-level entry points
//!
//! `assemble` validates the model, lays the document out and serializes it.
//! The two halves are also exposed separately so callers and tests can
//! inspect the laid-out pages before any bytes are written.

use chrono::NaiveDate;
use log::{info, warn};

use crate::config::{Locale, ReportConfig};
use crate::context::{LogoPlacement, RenderContext};
use crate::error::ReportResult;
use crate::font_registry::{FontRegistry, FontSet};
use crate::image_registry::LogoImage;
use crate::model::ReportModel;
use crate::page::Page;
use crate::pagination::{layout_document, SectionAnchor, TocEntry};
use crate::plan::Section;
use crate::renderer::PdfRenderer;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Finished document plus what the HTTP layer needs to attach it
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: &'static str,
}

/// Paginated document before serialization
pub struct LaidOutReport {
    pub pages: Vec<Page>,
    pub toc: Vec<TocEntry>,
    pub anchors: Vec<SectionAnchor>,
    pub sections: Vec<Section>,
    pub title: String,
    pub company: String,
    pub date: NaiveDate,
    pub fonts: FontSet,
    pub images: Vec<LogoImage>,
    pub(crate) registry: FontRegistry,
}

impl LaidOutReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Printed page number of a section heading
    pub fn page_of(&self, section: Section) -> Option<u32> {
        let anchor = self.anchors.iter().find(|a| a.section == section)?;
        self.pages.get(anchor.page_index)?.number
    }

    /// TOC titles in order
    pub fn toc_titles(&self) -> Vec<&str> {
        self.toc.iter().map(|e| e.title.as_str()).collect()
    }
}

/// Lay out and serialize a report
///
/// Missing optional content never fails; a missing or out-of-range score,
/// an unsupported font family, invalid configuration or a serialization
/// failure do.
pub fn assemble(model: &ReportModel, config: &ReportConfig) -> ReportResult<RenderedReport> {
    info!(
        "Assembling report for '{}' ({:?}, premium tier: {})",
        model.company_name().unwrap_or_default(),
        config.locale,
        model.is_premium_tier()
    );
    let laid_out = layout_report(model, config)?;
    let bytes = render_pdf(&laid_out, config)?;
    let filename = report_filename(
        model.company_name().as_deref(),
        config.locale,
        model.is_premium_tier(),
    );
    info!(
        "Report assembled: {} pages, {} bytes, {}",
        laid_out.page_count(),
        bytes.len(),
        filename
    );
    Ok(RenderedReport {
        bytes,
        filename,
        mime_type: PDF_MIME_TYPE,
    })
}

/// Everything up to and including page numbering
pub fn layout_report(model: &ReportModel, config: &ReportConfig) -> ReportResult<LaidOutReport> {
    let mut registry = FontRegistry::new(config.font_family()?);

    let mut images = Vec::new();
    let logo = match model.logo.as_deref() {
        Some(bytes) => match LogoImage::decode(bytes) {
            Ok(image) => {
                let placement = LogoPlacement {
                    image: images.len(),
                    aspect: image.aspect(),
                };
                images.push(image);
                Some(placement)
            }
            Err(e) => {
                warn!("Logo could not be decoded, continuing without it: {}", e);
                None
            }
        },
        None => None,
    };

    let ctx = RenderContext::build(model, config, &mut registry, logo)?;
    let (pass, toc) = layout_document(&ctx);
    let sections = ctx.plan.sections().to_vec();
    let (title, company, date, fonts) = (ctx.title.clone(), ctx.company(), ctx.date, ctx.fonts);

    Ok(LaidOutReport {
        pages: pass.pages,
        toc,
        anchors: pass.anchors,
        sections,
        title,
        company,
        date,
        fonts,
        images,
        registry,
    })
}

/// Serialize a laid-out report
pub fn render_pdf(report: &LaidOutReport, config: &ReportConfig) -> ReportResult<Vec<u8>> {
    PdfRenderer::new(config.compress).render(report)
}

/// `affarsanalys-acme-ab.pdf`, `business-analysis-acme-ab-premium.pdf`
pub fn report_filename(company: Option<&str>, locale: Locale, premium: bool) -> String {
    let prefix = match locale {
        Locale::Sv => "affarsanalys",
        Locale::En => "business-analysis",
    };
    let mut name = prefix.to_string();
    let slug = company.map(slugify).unwrap_or_default();
    if !slug.is_empty() {
        name.push('-');
        name.push_str(&slug);
    }
    if premium {
        name.push_str("-premium");
    }
    name.push_str(".pdf");
    name
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars().flat_map(char::to_lowercase) {
        let mapped = match ch {
            'å' | 'ä' | 'á' | 'à' | 'â' => 'a',
            'ö' | 'ø' | 'ó' | 'ò' | 'ô' => 'o',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'ü' | 'ú' => 'u',
            c if c.is_ascii_alphanumeric() => c,
            _ => '-',
        };
        if mapped == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(mapped);
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Åkerö Ärlig AB"), "akero-arlig-ab");
        assert_eq!(slugify("  --Acme & Co!  "), "acme-co");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            report_filename(Some("Solkraft AB"), Locale::Sv, false),
            "affarsanalys-solkraft-ab.pdf"
        );
        assert_eq!(
            report_filename(Some("Solkraft AB"), Locale::En, true),
            "business-analysis-solkraft-ab-premium.pdf"
        );
        assert_eq!(report_filename(None, Locale::Sv, false), "affarsanalys.pdf");
    }

    #[test]
    fn test_invalid_logo_is_skipped() {
        let mut model = ReportModel::from_json_str(r#"{"score": 61}"#).unwrap();
        model.logo = Some(b"not an image".to_vec());
        let laid_out = layout_report(&model, &ReportConfig::default()).unwrap();
        assert!(laid_out.images.is_empty());
        assert!(render_pdf(&laid_out, &ReportConfig::default()).is_ok());
    }

    #[test]
    fn test_missing_score_is_fatal() {
        let model = ReportModel::from_json_str(r#"{"answers": {"team": "x"}}"#).unwrap();
        assert!(matches!(
            assemble(&model, &ReportConfig::default()),
            Err(ReportError::MissingScore)
        ));
    }

    #[test]
    fn test_rendered_report_metadata() {
        let model =
            ReportModel::from_json_str(r#"{"score": 77, "companyName": "Nordljus AB"}"#).unwrap();
        let report = assemble(&model, &ReportConfig::default()).unwrap();
        assert_eq!(report.mime_type, "application/pdf");
        assert_eq!(report.filename, "affarsanalys-nordljus-ab.pdf");
        assert!(report.bytes.starts_with(b"%PDF"));
    }
}
