//! Per-document rendering context
//!
//! Built once per `assemble` call and shared read-only by every section
//! renderer. Nothing here is cached across documents.

use chrono::NaiveDate;

use crate::config::{LayoutConfig, Palette, ReportConfig};
use crate::error::ReportResult;
use crate::font_registry::{FontHandle, FontRegistry, FontSet, FontStyle};
use crate::labels::Labels;
use crate::model::{ReportModel, Score};
use crate::plan::{PremiumData, SectionPlan};
use crate::scoring::ScoreBand;

/// Where the decoded logo sits in the document's image list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    pub image: usize,
    /// Width divided by height
    pub aspect: f64,
}

pub struct RenderContext<'a> {
    pub model: &'a ReportModel,
    pub score: Score,
    pub band: ScoreBand,
    pub fonts: FontSet,
    pub palette: Palette,
    pub layout: LayoutConfig,
    pub labels: &'static Labels,
    pub premium: Option<PremiumData>,
    pub plan: SectionPlan,
    pub logo: Option<LogoPlacement>,
    pub date: NaiveDate,
    pub title: String,
}

impl<'a> RenderContext<'a> {
    /// Validate the model and config and resolve everything layout needs
    ///
    /// Fails on a missing or out-of-range score, an unsupported font
    /// family, or invalid configuration values.
    pub fn build(
        model: &'a ReportModel,
        config: &ReportConfig,
        registry: &mut FontRegistry,
        logo: Option<LogoPlacement>,
    ) -> ReportResult<Self> {
        let score = model.validated_score()?;
        let fonts = registry.embed_set()?;
        config.validate()?;
        let palette = config.palette.resolve()?;
        let labels = Labels::for_locale(config.locale);
        let premium = PremiumData::resolve(model);
        let plan = SectionPlan::from_model(model, premium.as_ref());
        let date = model
            .generated_on
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let title = config
            .title
            .clone()
            .unwrap_or_else(|| labels.report_title.to_string());

        Ok(Self {
            model,
            score,
            band: ScoreBand::from_score(score),
            fonts,
            palette,
            layout: config.layout,
            labels,
            premium,
            plan,
            logo,
            date,
            title,
        })
    }

    pub fn font(&self, style: FontStyle) -> &FontHandle {
        self.fonts.get(style)
    }

    /// Company name or the locale placeholder
    pub fn company(&self) -> String {
        self.model
            .company_name()
            .unwrap_or_else(|| self.labels.placeholder.to_string())
    }

    pub fn premium(&self) -> Option<&PremiumData> {
        self.premium.as_ref()
    }
}
