//! User-visible strings for the supported locales

use crate::config::Locale;
use crate::plan::{NarrativeKind, Section};
use crate::scoring::{Category, ScoreBand};

pub struct Labels {
    pub locale: Locale,
    pub placeholder: &'static str,
    pub report_title: &'static str,
    pub report_subtitle: &'static str,
    pub score_caption: &'static str,
    pub premium_badge: &'static str,
    pub date_label: &'static str,
    pub card_score: &'static str,
    pub card_assessment: &'static str,
    pub card_answered: &'static str,
    pub strengths: &'static str,
    pub improvements: &'static str,
    pub none_identified: &'static str,
    pub total_score: &'static str,
    pub analysis: &'static str,
    pub months: &'static str,
    pub capital_need: &'static str,
    pub allocation: [&'static str; 4],
    pub milestones: &'static str,
    pub projection_headers: [&'static str; 5],
    pub benchmark_headers: [&'static str; 4],
    pub peer_headers: [&'static str; 4],
    pub risk_headers: [&'static str; 5],
    pub swot_quadrants: [&'static str; 4],
    pub ask: &'static str,
    pub valuation: &'static str,
    pub use_of_funds: &'static str,
    pub key_metrics: &'static str,
    pub investor_benefits: &'static str,
    pub trends: &'static str,
    pub opportunities: &'static str,
    pub threats: &'static str,
    pub horizons: [&'static str; 3],
    pub recommendation_fields: [&'static str; 5],
    pub scene: &'static str,
    pub visual: &'static str,
    pub voice_over: &'static str,
    pub duration: &'static str,
    pub usage: &'static str,
    pub emotion: &'static str,
    pub keywords: &'static str,
    pub score_below_threshold: &'static str,
}

static SV: Labels = Labels {
    locale: Locale::Sv,
    placeholder: "Ej angivet",
    report_title: "AFFÄRSANALYS",
    report_subtitle: "Rapport om investeringsbarhet",
    score_caption: "Investeringspoäng",
    premium_badge: "PREMIUM",
    date_label: "Datum",
    card_score: "Poäng",
    card_assessment: "Bedömning",
    card_answered: "Besvarade frågor",
    strengths: "Styrkor",
    improvements: "Förbättringsområden",
    none_identified: "Inga identifierade",
    total_score: "Totalpoäng",
    analysis: "Analys",
    months: "månader",
    capital_need: "Kapitalbehov",
    allocation: ["Produkt", "Försäljning", "Team", "Övrigt"],
    milestones: "Milstolpar",
    projection_headers: ["År", "Intäkter", "Kostnader", "EBITDA", "Kunder"],
    benchmark_headers: ["Nyckeltal", "Vi", "Branschen", "Bedömning"],
    peer_headers: ["Företag", "Finansiering", "Intäkter", "Värdering"],
    risk_headers: ["Risk", "Sannolikhet", "Påverkan", "Åtgärd", "Status"],
    swot_quadrants: ["Styrkor", "Svagheter", "Möjligheter", "Hot"],
    ask: "Kapitalbehov",
    valuation: "Värdering",
    use_of_funds: "Användning av kapital",
    key_metrics: "Nyckeltal",
    investor_benefits: "Fördelar för investerare",
    trends: "Trender",
    opportunities: "Möjligheter",
    threats: "Hot",
    horizons: ["Omedelbart", "Kort sikt", "Lång sikt"],
    recommendation_fields: ["Varför", "Hur", "Effekt", "Resurser", "Tidslinje"],
    scene: "Scen",
    visual: "Bild",
    voice_over: "Speakertext",
    duration: "Längd",
    usage: "Användning",
    emotion: "Känsla",
    keywords: "Nyckelord",
    score_below_threshold: "Totalpoängen ligger under 50",
};

static EN: Labels = Labels {
    locale: Locale::En,
    placeholder: "Not specified",
    report_title: "BUSINESS ANALYSIS",
    report_subtitle: "Investability report",
    score_caption: "Investability score",
    premium_badge: "PREMIUM",
    date_label: "Date",
    card_score: "Score",
    card_assessment: "Assessment",
    card_answered: "Answered questions",
    strengths: "Strengths",
    improvements: "Areas to improve",
    none_identified: "None identified",
    total_score: "Total score",
    analysis: "Analysis",
    months: "months",
    capital_need: "Capital requirement",
    allocation: ["Product", "Sales", "Team", "Other"],
    milestones: "Milestones",
    projection_headers: ["Year", "Revenue", "Costs", "EBITDA", "Customers"],
    benchmark_headers: ["Metric", "Us", "Industry", "Verdict"],
    peer_headers: ["Company", "Funding", "Revenue", "Valuation"],
    risk_headers: ["Risk", "Probability", "Impact", "Mitigation", "Status"],
    swot_quadrants: ["Strengths", "Weaknesses", "Opportunities", "Threats"],
    ask: "Ask",
    valuation: "Valuation",
    use_of_funds: "Use of funds",
    key_metrics: "Key metrics",
    investor_benefits: "Investor benefits",
    trends: "Trends",
    opportunities: "Opportunities",
    threats: "Threats",
    horizons: ["Immediate", "Short term", "Long term"],
    recommendation_fields: ["Why", "How", "Impact", "Resources", "Timeline"],
    scene: "Scene",
    visual: "Visual",
    voice_over: "Voice-over",
    duration: "Duration",
    usage: "Usage",
    emotion: "Emotion",
    keywords: "Keywords",
    score_below_threshold: "Overall score is below 50",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::Sv => &SV,
            Locale::En => &EN,
        }
    }

    fn pick(&self, sv: &'static str, en: &'static str) -> &'static str {
        match self.locale {
            Locale::Sv => sv,
            Locale::En => en,
        }
    }

    pub fn section_title(&self, section: Section) -> &'static str {
        match section {
            Section::Cover => self.report_title,
            Section::TableOfContents => self.pick("Innehållsförteckning", "Table of contents"),
            Section::Summary => self.pick("Sammanfattning", "Executive summary"),
            Section::ScoreBreakdown => self.pick("Poängfördelning", "Score breakdown"),
            Section::Narrative(kind) => self.narrative_title(kind),
            Section::ActionPlan => self.pick("Handlingsplan", "Action plan"),
            Section::Swot => self.pick("SWOT-analys", "SWOT analysis"),
            Section::FinancialProjections => {
                self.pick("Finansiella prognoser", "Financial projections")
            }
            Section::Benchmarks => self.pick("Benchmarking", "Benchmarks"),
            Section::InvestmentProposal => self.pick("Investeringsförslag", "Investment proposal"),
            Section::MarketInsights => self.pick("Marknadsinsikter", "Market insights"),
            Section::Recommendations => {
                self.pick("Detaljerade rekommendationer", "Detailed recommendations")
            }
            Section::RiskMatrix => self.pick("Riskanalys", "Risk matrix"),
            Section::FilmScript => self.pick("Filmmanus", "Film script"),
            Section::ImagePrompts => self.pick("Bildprompter", "Image prompts"),
        }
    }

    fn narrative_title(&self, kind: NarrativeKind) -> &'static str {
        match kind {
            NarrativeKind::ProblemSolution => self.pick("Problem & lösning", "Problem & solution"),
            NarrativeKind::Market => self.pick("Marknad", "Market"),
            NarrativeKind::BusinessModel => self.pick("Affärsmodell", "Business model"),
            NarrativeKind::Team => "Team",
            NarrativeKind::Traction => self.pick("Traktion & milstolpar", "Traction & milestones"),
            NarrativeKind::Financials => self.pick("Finansiering", "Financials"),
            NarrativeKind::RisksStrategy => self.pick("Risker & strategi", "Risks & strategy"),
        }
    }

    /// Human label of a questionnaire key
    pub fn answer_label(&self, key: &str) -> &'static str {
        match key {
            "customer_problem" => self.pick("Kundproblem", "Customer problem"),
            "solution" => self.pick("Lösning", "Solution"),
            "market_size" => self.pick("Marknadsstorlek", "Market size"),
            "target_customer" => self.pick("Målgrupp", "Target customer"),
            "competitors" => self.pick("Konkurrenter", "Competitors"),
            "revenue_model" => self.pick("Intäktsmodell", "Revenue model"),
            "revenue_block" => self.pick("Intäkter", "Revenue"),
            "pricing" => self.pick("Prissättning", "Pricing"),
            "team" => "Team",
            "founder_market_fit" => "Founder-market fit",
            "traction" => self.pick("Traktion", "Traction"),
            "milestones" => self.milestones,
            "runway" => "Runway",
            "capital_block" => self.capital_need,
            "unit_economics" => self.pick("Enhetsekonomi", "Unit economics"),
            "risks" => self.pick("Risker", "Risks"),
            "moat" => self.pick("Konkurrensfördel", "Moat"),
            "exit_strategy" => self.pick("Exitstrategi", "Exit strategy"),
            "exit_potential" => self.pick("Exitpotential", "Exit potential"),
            _ => self.pick("Övrigt", "Other"),
        }
    }

    pub fn category_name(&self, category: Category) -> &'static str {
        match category {
            Category::ProblemSolution => self.pick("Problem/Lösning", "Problem/Solution"),
            Category::Market => self.pick("Marknad", "Market"),
            Category::BusinessModel => self.pick("Affärsmodell", "Business Model"),
            Category::Team => "Team",
            Category::Traction => self.pick("Traktion", "Traction"),
            Category::FinancialPlan => self.pick("Finansiell plan", "Financial Plan"),
            Category::RiskStrategy => self.pick("Risk/Strategi", "Risk/Strategy"),
        }
    }

    pub fn band_label(&self, band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Exceptional => self.pick("Exceptionell", "Exceptional"),
            ScoreBand::VeryStrong => self.pick("Mycket stark", "Very strong"),
            ScoreBand::Investable => self.pick("Investeringsbar", "Investable"),
            ScoreBand::NeedsWork => self.pick("Behöver arbete", "Needs work"),
            ScoreBand::EarlyStage => self.pick("Tidig fas", "Early stage"),
        }
    }

    pub fn band_explanation(&self, band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Exceptional => self.pick(
                "Mycket hög investeringsbarhet med tydliga styrkor i alla delar.",
                "Outstanding investability with clear strengths across the board.",
            ),
            ScoreBand::VeryStrong => self.pick(
                "Stark affärsplan med få och tydliga förbättringsområden.",
                "A strong plan with few, well-defined gaps.",
            ),
            ScoreBand::Investable => self.pick(
                "Investeringsbar, men vissa delar behöver stärkas.",
                "Investable, though some areas need strengthening.",
            ),
            ScoreBand::NeedsWork => self.pick(
                "Grunden finns, men flera delar behöver utvecklas.",
                "The foundation is there, but several areas need work.",
            ),
            ScoreBand::EarlyStage => self.pick(
                "Tidig fas. Fokusera på att validera grunderna.",
                "Early stage. Focus on validating the fundamentals.",
            ),
        }
    }

    pub fn band_step(&self, band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Exceptional => self.pick(
                "Förbered due diligence-material och inled dialog med investerare.",
                "Prepare due diligence material and open investor conversations.",
            ),
            ScoreBand::VeryStrong => self.pick(
                "Finslipa pitchen och ta fram en lista med relevanta investerare.",
                "Polish the pitch and build a shortlist of relevant investors.",
            ),
            ScoreBand::Investable => self.pick(
                "Stärk traktionen med mätbara nyckeltal innan kapitalanskaffning.",
                "Strengthen traction with measurable KPIs before raising.",
            ),
            ScoreBand::NeedsWork => self.pick(
                "Validera affärsmodellen med betalande kunder.",
                "Validate the business model with paying customers.",
            ),
            ScoreBand::EarlyStage => self.pick(
                "Fokusera på att validera problem och lösning innan extern finansiering.",
                "Focus on problem-solution validation before seeking outside capital.",
            ),
        }
    }

    pub fn missing_answer_step(&self, key: &str) -> String {
        let label = self.answer_label(key);
        match self.locale {
            Locale::Sv => format!("Komplettera avsnittet \"{}\" med konkreta uppgifter.", label),
            Locale::En => format!("Complete the \"{}\" section with concrete details.", label),
        }
    }

    pub fn category_strength(&self, category: Category) -> String {
        match self.locale {
            Locale::Sv => format!("{}: väl underbyggt", self.category_name(category)),
            Locale::En => format!("{}: well supported", self.category_name(category)),
        }
    }

    pub fn category_weakness(&self, category: Category) -> String {
        match self.locale {
            Locale::Sv => format!("{}: behöver kompletteras", self.category_name(category)),
            Locale::En => format!("{}: needs more detail", self.category_name(category)),
        }
    }

    pub fn summary_sentence(
        &self,
        company: &str,
        score: u8,
        band: ScoreBand,
        answered: usize,
        total: usize,
    ) -> String {
        let band = self.band_label(band).to_lowercase();
        match self.locale {
            Locale::Sv => format!(
                "{} får {} av 100 poäng och bedöms som {}. {} av {} frågor är besvarade.",
                company, score, band, answered, total
            ),
            Locale::En => format!(
                "{} scores {} out of 100 and is rated {}. {} of {} questions are answered.",
                company, score, band, answered, total
            ),
        }
    }

    pub fn runway(&self, months: f64) -> String {
        format!("{} {}", format_number(months), self.months)
    }

    pub fn page_stamp(&self, page: u32, total: u32) -> String {
        match self.locale {
            Locale::Sv => format!("Sida {} av {}", page, total),
            Locale::En => format!("Page {} of {}", page, total),
        }
    }

    pub fn founder_fit(&self, score: f64) -> String {
        format!("Founder-market fit: {}/5", format_number(score))
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{:.1}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locales_differ() {
        let sv = Labels::for_locale(Locale::Sv);
        let en = Labels::for_locale(Locale::En);
        assert_eq!(sv.placeholder, "Ej angivet");
        assert_eq!(en.placeholder, "Not specified");
        assert_eq!(sv.page_stamp(2, 9), "Sida 2 av 9");
        assert_eq!(en.page_stamp(2, 9), "Page 2 of 9");
    }

    #[test]
    fn test_swot_title_mentions_swot() {
        for locale in [Locale::Sv, Locale::En] {
            assert!(Labels::for_locale(locale)
                .section_title(Section::Swot)
                .contains("SWOT"));
        }
    }

    #[test]
    fn test_runway_formatting() {
        let sv = Labels::for_locale(Locale::Sv);
        assert_eq!(sv.runway(18.0), "18 månader");
        assert_eq!(sv.runway(6.5), "6.5 månader");
    }
}
