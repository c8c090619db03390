//! Section planning
//!
//! The set of rendered sections is decided up front from the model, so the
//! table of contents can list exactly what will be drawn.

use crate::model::{
    BenchmarkAnalysis, DetailedRecommendations, FilmScript, FinancialProjections, ImagePrompt,
    InvestmentProposal, MarketInsights, ReportModel, RiskMitigation, Swot,
};

/// Narrative sections backed by questionnaire answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NarrativeKind {
    ProblemSolution,
    Market,
    BusinessModel,
    Team,
    Traction,
    Financials,
    RisksStrategy,
}

impl NarrativeKind {
    pub const ALL: [NarrativeKind; 7] = [
        NarrativeKind::ProblemSolution,
        NarrativeKind::Market,
        NarrativeKind::BusinessModel,
        NarrativeKind::Team,
        NarrativeKind::Traction,
        NarrativeKind::Financials,
        NarrativeKind::RisksStrategy,
    ];

    /// Key of the AI narrative text for this section
    pub fn narrative_key(self) -> &'static str {
        match self {
            NarrativeKind::ProblemSolution => "problem_solution",
            NarrativeKind::Market => "market",
            NarrativeKind::BusinessModel => "business_model",
            NarrativeKind::Team => "team",
            NarrativeKind::Traction => "traction",
            NarrativeKind::Financials => "financials",
            NarrativeKind::RisksStrategy => "risks_strategy",
        }
    }

    /// Answer keys rendered by this section, in display order
    pub fn backing_keys(self) -> &'static [&'static str] {
        match self {
            NarrativeKind::ProblemSolution => &["customer_problem", "solution"],
            NarrativeKind::Market => &["market_size", "target_customer", "competitors"],
            NarrativeKind::BusinessModel => &["revenue_model", "revenue_block", "pricing"],
            NarrativeKind::Team => &["team", "founder_market_fit"],
            NarrativeKind::Traction => &["traction", "milestones"],
            NarrativeKind::Financials => &["runway", "capital_block", "unit_economics"],
            NarrativeKind::RisksStrategy => {
                &["risks", "moat", "exit_strategy", "exit_potential", "runway"]
            }
        }
    }

    pub fn is_backed(self, model: &ReportModel) -> bool {
        self.backing_keys().iter().any(|k| model.answers.is_present(k))
            || model.narrative_for(self.narrative_key()).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Cover,
    TableOfContents,
    Summary,
    ScoreBreakdown,
    Narrative(NarrativeKind),
    ActionPlan,
    Swot,
    FinancialProjections,
    Benchmarks,
    InvestmentProposal,
    MarketInsights,
    Recommendations,
    RiskMatrix,
    FilmScript,
    ImagePrompts,
}

impl Section {
    pub fn is_premium(self) -> bool {
        matches!(
            self,
            Section::Swot
                | Section::FinancialProjections
                | Section::Benchmarks
                | Section::InvestmentProposal
                | Section::MarketInsights
                | Section::Recommendations
                | Section::RiskMatrix
                | Section::FilmScript
                | Section::ImagePrompts
        )
    }

    /// Narrative sections flow on; everything else opens a fresh page
    pub fn starts_new_page(self) -> bool {
        !matches!(self, Section::Narrative(_) | Section::ActionPlan)
    }

    pub fn in_toc(self) -> bool {
        !matches!(self, Section::Cover | Section::TableOfContents)
    }
}

/// Premium content normalized so that `Some` always means "renderable"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PremiumData {
    pub swot: Option<Swot>,
    pub projections: Option<FinancialProjections>,
    pub benchmarks: Option<BenchmarkAnalysis>,
    pub investment: Option<InvestmentProposal>,
    pub market: Option<MarketInsights>,
    pub recommendations: Option<DetailedRecommendations>,
    pub risks: Option<RiskMitigation>,
    pub film: Option<FilmScript>,
    pub image_prompts: Option<Vec<ImagePrompt>>,
}

impl PremiumData {
    /// `None` when the model carries no premium payload at all
    pub fn resolve(model: &ReportModel) -> Option<Self> {
        let payload = model.premium()?;
        let answers = &model.answers;

        Some(Self {
            swot: payload.swot.filter(|s| !s.is_empty()),
            projections: payload
                .financial_projections
                .or_else(|| answers.structured("financial_projections").parsed())
                .filter(|p| !p.is_empty()),
            benchmarks: payload.benchmark_analysis.filter(|b| !b.is_empty()),
            investment: payload.investment_proposal.filter(|i| !i.is_empty()),
            market: payload
                .market_insights
                .or_else(|| answers.structured("market_analysis").parsed())
                .filter(|m| !m.is_empty()),
            recommendations: payload.detailed_recommendations.filter(|r| !r.is_empty()),
            risks: payload
                .risk_mitigation
                .filter(|r| !r.identified_risks.is_empty()),
            film: payload.film_script.filter(|f| !f.scenes.is_empty()),
            image_prompts: payload.image_prompts.filter(|p| !p.is_empty()),
        })
    }
}

/// Ordered list of sections that will be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPlan {
    sections: Vec<Section>,
}

impl SectionPlan {
    pub fn from_model(model: &ReportModel, premium: Option<&PremiumData>) -> Self {
        let mut sections = vec![
            Section::Cover,
            Section::TableOfContents,
            Section::Summary,
            Section::ScoreBreakdown,
        ];

        sections.extend(
            NarrativeKind::ALL
                .into_iter()
                .filter(|kind| kind.is_backed(model))
                .map(Section::Narrative),
        );
        sections.push(Section::ActionPlan);

        if let Some(PremiumData {
            swot,
            projections,
            benchmarks,
            investment,
            market,
            recommendations,
            risks,
            film,
            image_prompts,
        }) = premium
        {
            let candidates = [
                (swot.is_some(), Section::Swot),
                (projections.is_some(), Section::FinancialProjections),
                (benchmarks.is_some(), Section::Benchmarks),
                (investment.is_some(), Section::InvestmentProposal),
                (market.is_some(), Section::MarketInsights),
                (recommendations.is_some(), Section::Recommendations),
                (risks.is_some(), Section::RiskMatrix),
                (film.is_some(), Section::FilmScript),
                (image_prompts.is_some(), Section::ImagePrompts),
            ];
            sections.extend(
                candidates
                    .into_iter()
                    .filter_map(|(present, section)| present.then_some(section)),
            );
        }

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn toc_sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections.iter().copied().filter(|s| s.in_toc())
    }

    pub fn contains(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(json: &str) -> ReportModel {
        ReportModel::from_json_str(json).unwrap()
    }

    #[test]
    fn test_minimal_model_has_fixed_sections() {
        let m = model(r#"{"score": 40}"#);
        let plan = SectionPlan::from_model(&m, PremiumData::resolve(&m).as_ref());
        assert_eq!(
            plan.sections(),
            &[
                Section::Cover,
                Section::TableOfContents,
                Section::Summary,
                Section::ScoreBreakdown,
                Section::ActionPlan,
            ]
        );
    }

    #[test]
    fn test_narrative_sections_follow_answers() {
        let m = model(r#"{"score": 70, "answers": {"team": "Två grundare", "pricing": "99 kr"}}"#);
        let plan = SectionPlan::from_model(&m, None);
        assert!(plan.contains(Section::Narrative(NarrativeKind::Team)));
        assert!(plan.contains(Section::Narrative(NarrativeKind::BusinessModel)));
        assert!(!plan.contains(Section::Narrative(NarrativeKind::Market)));
    }

    #[test]
    fn test_narrative_text_alone_backs_section() {
        let m = model(r#"{"score": 70, "narrative": {"market": "Stor marknad"}}"#);
        let plan = SectionPlan::from_model(&m, None);
        assert!(plan.contains(Section::Narrative(NarrativeKind::Market)));
    }

    #[test]
    fn test_premium_sections_follow_payload() {
        let m = model(
            r#"{"score": 90, "premiumAnalysis": {
                "swot": {"strengths": ["s"]},
                "riskMitigation": {"identifiedRisks": []}
            }}"#,
        );
        let premium = PremiumData::resolve(&m);
        let plan = SectionPlan::from_model(&m, premium.as_ref());
        assert!(plan.contains(Section::Swot));
        assert!(!plan.contains(Section::RiskMatrix));
        assert!(!plan.contains(Section::FilmScript));
    }

    #[test]
    fn test_projections_fall_back_to_answers() {
        let m = model(
            r#"{"score": 90, "premiumAnalysis": {},
                "answers": {"financial_projections": "{\"year1\": {\"revenue\": 100}}"}}"#,
        );
        let premium = PremiumData::resolve(&m).unwrap();
        assert!(premium.projections.is_some());
    }

    #[test]
    fn test_toc_excludes_cover_and_toc() {
        let m = model(r#"{"score": 40}"#);
        let plan = SectionPlan::from_model(&m, None);
        let toc: Vec<Section> = plan.toc_sections().collect();
        assert_eq!(toc.len(), 3);
        assert!(toc.iter().all(|s| s.in_toc()));
    }
}
