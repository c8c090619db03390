//! Score interpretation
//!
//! The numeric score and category scores come from an external scoring
//! collaborator. When category scores are not supplied, the breakdown
//! falls back to a presence heuristic over the answer keys of each
//! category; content quality is never assessed here.

use crate::labels::Labels;
use crate::model::{ReportModel, Score};
use crate::plan::NarrativeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Exceptional,
    VeryStrong,
    Investable,
    NeedsWork,
    EarlyStage,
}

impl ScoreBand {
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            95..=100 => ScoreBand::Exceptional,
            85..=94 => ScoreBand::VeryStrong,
            75..=84 => ScoreBand::Investable,
            50..=74 => ScoreBand::NeedsWork,
            _ => ScoreBand::EarlyStage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ProblemSolution,
    Market,
    BusinessModel,
    Team,
    Traction,
    FinancialPlan,
    RiskStrategy,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::ProblemSolution,
        Category::Market,
        Category::BusinessModel,
        Category::Team,
        Category::Traction,
        Category::FinancialPlan,
        Category::RiskStrategy,
    ];

    /// Maximum points; the weights sum to 100
    pub fn weight(self) -> u32 {
        match self {
            Category::ProblemSolution => 20,
            Category::Market
            | Category::BusinessModel
            | Category::Team
            | Category::Traction => 15,
            Category::FinancialPlan | Category::RiskStrategy => 10,
        }
    }

    /// Key used in `categoryScores`
    pub fn key(self) -> &'static str {
        match self {
            Category::ProblemSolution => "problem_solution",
            Category::Market => "market",
            Category::BusinessModel => "business_model",
            Category::Team => "team",
            Category::Traction => "traction",
            Category::FinancialPlan => "financial_plan",
            Category::RiskStrategy => "risk_strategy",
        }
    }

    pub fn answer_keys(self) -> &'static [&'static str] {
        match self {
            Category::ProblemSolution => NarrativeKind::ProblemSolution.backing_keys(),
            Category::Market => NarrativeKind::Market.backing_keys(),
            Category::BusinessModel => NarrativeKind::BusinessModel.backing_keys(),
            Category::Team => NarrativeKind::Team.backing_keys(),
            Category::Traction => NarrativeKind::Traction.backing_keys(),
            Category::FinancialPlan => NarrativeKind::Financials.backing_keys(),
            Category::RiskStrategy => &["risks", "moat", "exit_strategy", "exit_potential"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore {
    pub category: Category,
    pub actual: u32,
    pub max: u32,
}

impl CategoryScore {
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            (self.actual as f64 / self.max as f64).clamp(0.0, 1.0)
        }
    }
}

/// Color band of a breakdown bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLevel {
    Good,
    Fair,
    Poor,
}

impl BarLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.7 {
            BarLevel::Good
        } else if ratio >= 0.5 {
            BarLevel::Fair
        } else {
            BarLevel::Poor
        }
    }
}

pub fn breakdown(model: &ReportModel) -> Vec<CategoryScore> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let max = category.weight();
            let supplied = model
                .category_scores
                .as_ref()
                .and_then(|scores| scores.get(category.key()))
                .map(|v| v.round().clamp(0.0, max as f64) as u32);
            let actual = supplied.unwrap_or_else(|| {
                let keys = category.answer_keys();
                let present = keys.iter().filter(|k| model.answers.is_present(k)).count();
                (max as f64 * present as f64 / keys.len() as f64).round() as u32
            });
            CategoryScore { category, actual, max }
        })
        .collect()
}

/// Every questionnaire key the report knows about
pub fn question_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Vec::new();
    for category in Category::ALL {
        for key in category.answer_keys() {
            if !keys.contains(key) {
                keys.push(key);
            }
        }
    }
    keys
}

const MAX_COLUMN_ITEMS: usize = 6;

pub fn strengths(scores: &[CategoryScore], labels: &Labels) -> Vec<String> {
    scores
        .iter()
        .filter(|s| BarLevel::from_ratio(s.ratio()) == BarLevel::Good)
        .map(|s| labels.category_strength(s.category))
        .take(MAX_COLUMN_ITEMS)
        .collect()
}

pub fn weaknesses(scores: &[CategoryScore], score: Score, labels: &Labels) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    if score.value() < 50 {
        items.push(labels.score_below_threshold.to_string());
    }
    items.extend(
        scores
            .iter()
            .filter(|s| BarLevel::from_ratio(s.ratio()) != BarLevel::Good)
            .map(|s| labels.category_weakness(s.category)),
    );
    items.truncate(MAX_COLUMN_ITEMS);
    items
}

const MAX_MISSING_STEPS: usize = 5;

/// Numbered action plan: missing answers first, then one step for the band
pub fn action_steps(model: &ReportModel, score: Score, labels: &Labels) -> Vec<String> {
    let mut steps: Vec<String> = question_keys()
        .into_iter()
        .filter(|key| !model.answers.is_present(key))
        .take(MAX_MISSING_STEPS)
        .map(|key| labels.missing_answer_step(key))
        .collect();
    steps.push(labels.band_step(ScoreBand::from_score(score)).to_string());
    steps
}
