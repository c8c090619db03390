//! Report model consumed by the layout engine
//!
//! The model is fully materialized before layout starts: the score is
//! computed and AI narrative text generated by upstream collaborators.
//! Everything except the score is optional.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{ReportError, ReportResult};

/// Validated investability score, 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u8);

impl Score {
    pub fn new(value: i64) -> ReportResult<Self> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ReportError::ScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Subscription tier requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionLevel {
    Free,
    Standard,
    Premium,
    Gold,
    Platinum,
    /// A tier this engine does not know; rendered as the standard report
    #[serde(other)]
    Unknown,
}

impl SubscriptionLevel {
    pub fn is_premium(self) -> bool {
        matches!(
            self,
            SubscriptionLevel::Premium | SubscriptionLevel::Gold | SubscriptionLevel::Platinum
        )
    }
}

/// Result of reading a structured answer
#[derive(Debug, Clone, PartialEq)]
pub enum Structured<T> {
    Parsed(T),
    /// Present but not in the expected shape; holds the raw text
    Raw(String),
    Absent,
}

impl<T> Structured<T> {
    pub fn parsed(self) -> Option<T> {
        match self {
            Structured::Parsed(value) => Some(value),
            _ => None,
        }
    }
}

/// Questionnaire answers keyed by question id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, Value>);

impl Answers {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Display text of an answer; `None` when absent or blank
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.0.get(key)? {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                })
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            other @ Value::Object(_) => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse().ok(),
            _ => None,
        }
    }

    pub fn is_present(&self, key: &str) -> bool {
        self.text(key).is_some()
    }

    /// Number of answers that carry content
    pub fn answered_count(&self) -> usize {
        self.0
            .keys()
            .filter(|k| k.as_str() != "premiumAnalysis" && self.is_present(k))
            .count()
    }

    /// Read an answer that upstream may deliver either as JSON or as a
    /// JSON-encoded string
    pub fn structured<T: DeserializeOwned>(&self, key: &str) -> Structured<T> {
        let Some(value) = self.0.get(key) else {
            return Structured::Absent;
        };
        match value {
            Value::Null => Structured::Absent,
            Value::String(s) if s.trim().is_empty() => Structured::Absent,
            Value::String(s) => match serde_json::from_str::<T>(s) {
                Ok(parsed) => Structured::Parsed(parsed),
                Err(_) => Structured::Raw(s.trim().to_string()),
            },
            other => match serde_json::from_value::<T>(other.clone()) {
                Ok(parsed) => Structured::Parsed(parsed),
                Err(_) => Structured::Raw(other.to_string()),
            },
        }
    }
}

/// String or number cell value as delivered by upstream JSON
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Flag(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Milestone {
    pub milestone: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FounderFit {
    pub score: f64,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CapitalAllocation {
    pub amount: Scalar,
    #[serde(default)]
    pub product: Option<f64>,
    #[serde(default)]
    pub sales: Option<f64>,
    #[serde(default)]
    pub team: Option<f64>,
    #[serde(default)]
    pub other: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectionRow {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub revenue: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub costs: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub ebitda: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub customers: Option<Scalar>,
}

/// Year label (e.g. `year1`) to projection row
pub type FinancialProjections = BTreeMap<String, ProjectionRow>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Swot {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub opportunities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub threats: Vec<String>,
}

impl Swot {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.opportunities.is_empty()
            && self.threats.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarketInsights {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub trends: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub opportunities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub threats: Vec<String>,
}

impl MarketInsights {
    pub fn is_empty(&self) -> bool {
        self.trends.is_empty() && self.opportunities.is_empty() && self.threats.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkMetric {
    pub us: Scalar,
    pub industry: Scalar,
    #[serde(default, deserialize_with = "lenient::text")]
    pub verdict: Option<String>,
}

/// Named metrics plus an optional free-form `metric` basis; entries that
/// are not metric objects are skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndustryComparison {
    pub metric: Option<String>,
    pub metrics: BTreeMap<String, BenchmarkMetric>,
}

impl<'de> Deserialize<'de> for IndustryComparison {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut comparison = IndustryComparison::default();
        for (key, value) in fields {
            if key == "metric" {
                comparison.metric = lenient::scalar_text(value);
            } else if let Some(metric) = lenient::from_value_or_warn(value) {
                comparison.metrics.insert(key, metric);
            }
        }
        Ok(comparison)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PeerCompany {
    /// Empty when upstream left it out; rendered as the placeholder
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub funding: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub revenue: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub valuation: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkAnalysis {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub industry_comparison: Option<IndustryComparison>,
    #[serde(default, deserialize_with = "lenient::item_list")]
    pub peer_comparison: Vec<PeerCompany>,
}

impl BenchmarkAnalysis {
    pub fn is_empty(&self) -> bool {
        self.industry_comparison
            .as_ref()
            .map_or(true, |c| c.metrics.is_empty())
            && self.peer_comparison.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProposal {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub ask_amount: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub valuation: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::scalar_map")]
    pub use_of_funds: BTreeMap<String, Scalar>,
    #[serde(default, deserialize_with = "lenient::scalar_map")]
    pub key_metrics: BTreeMap<String, Scalar>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub investor_benefits: Vec<String>,
}

impl InvestmentProposal {
    pub fn is_empty(&self) -> bool {
        self.ask_amount.is_none()
            && self.valuation.is_none()
            && self.use_of_funds.is_empty()
            && self.key_metrics.is_empty()
            && self.investor_benefits.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    /// Empty when upstream left it out; rendered as the placeholder
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub why: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub how: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub resources: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timeline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRecommendations {
    #[serde(default, deserialize_with = "lenient::item_list")]
    pub immediate: Vec<Recommendation>,
    #[serde(default, deserialize_with = "lenient::item_list")]
    pub short_term: Vec<Recommendation>,
    #[serde(default, deserialize_with = "lenient::item_list")]
    pub long_term: Vec<Recommendation>,
}

impl DetailedRecommendations {
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty() && self.short_term.is_empty() && self.long_term.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdentifiedRisk {
    /// Empty when upstream left it out; rendered as the placeholder
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub risk: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub probability: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub mitigation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMitigation {
    #[serde(default, deserialize_with = "lenient::item_list")]
    pub identified_risks: Vec<IdentifiedRisk>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmScene {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub visual: Option<String>,
    #[serde(default, alias = "voiceover", deserialize_with = "lenient::text")]
    pub voice_over: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilmScript {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::item_list")]
    pub scenes: Vec<FilmScene>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImagePrompt {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub usage: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub emotion: Option<String>,
    /// Empty when upstream left it out; rendered as the placeholder
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub prompt: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub keywords: Vec<String>,
}

/// Extended data set rendered only for the premium tier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PremiumPayload {
    pub swot: Option<Swot>,
    pub financial_projections: Option<FinancialProjections>,
    pub benchmark_analysis: Option<BenchmarkAnalysis>,
    pub investment_proposal: Option<InvestmentProposal>,
    pub market_insights: Option<MarketInsights>,
    pub detailed_recommendations: Option<DetailedRecommendations>,
    pub risk_mitigation: Option<RiskMitigation>,
    pub film_script: Option<FilmScript>,
    pub image_prompts: Option<Vec<ImagePrompt>>,
}

impl PremiumPayload {
    /// Resolve every part on its own, so a malformed part is left out
    /// without taking the rest of the payload with it
    ///
    /// Accepts the payload object itself or a JSON-encoded string of it.
    pub fn from_value(value: &Value) -> Option<Self> {
        let decoded;
        let parts = match value {
            Value::Object(parts) => parts,
            Value::Null => return None,
            Value::String(s) if s.trim().is_empty() => return None,
            Value::String(s) => {
                decoded = serde_json::from_str::<Value>(s).ok();
                match decoded.as_ref().and_then(Value::as_object) {
                    Some(parts) => parts,
                    None => {
                        warn!("premium payload is not a JSON object, ignoring it");
                        return None;
                    }
                }
            }
            _ => {
                warn!("premium payload is not a JSON object, ignoring it");
                return None;
            }
        };

        Some(Self {
            swot: premium_part(parts, "swot"),
            financial_projections: premium_part(parts, "financialProjections"),
            benchmark_analysis: premium_part(parts, "benchmarkAnalysis"),
            investment_proposal: premium_part(parts, "investmentProposal"),
            market_insights: premium_part(parts, "marketInsights"),
            detailed_recommendations: premium_part(parts, "detailedRecommendations"),
            risk_mitigation: premium_part(parts, "riskMitigation"),
            film_script: premium_part(parts, "filmScript"),
            image_prompts: parts.get("imagePrompts").and_then(|value| match value {
                Value::Array(items) => Some(
                    items
                        .iter()
                        .cloned()
                        .filter_map(lenient::from_value_or_warn)
                        .collect(),
                ),
                Value::Null => None,
                _ => {
                    warn!("premium part 'imagePrompts' is not a list, leaving it out");
                    None
                }
            }),
        })
    }
}

fn premium_part<T: DeserializeOwned>(parts: &Map<String, Value>, key: &str) -> Option<T> {
    let value = parts.get(key).filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(part) => Some(part),
        Err(e) => {
            warn!("premium part '{}' is malformed, leaving it out: {}", key, e);
            None
        }
    }
}

/// Input to the report pipeline
///
/// Only `score` is read strictly. Every other field degrades to absent
/// (with a warning) when it has the wrong shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub answers: Answers,
    #[serde(default, deserialize_with = "lenient::text_map")]
    pub narrative: BTreeMap<String, String>,
    /// Raw payload; parts are resolved on demand by `premium()`
    #[serde(default, alias = "premiumPayload")]
    pub premium_analysis: Option<Value>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub subscription_level: Option<SubscriptionLevel>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub generated_on: Option<NaiveDate>,
    /// Category scores from the external scoring collaborator
    #[serde(default, deserialize_with = "lenient::optional")]
    pub category_scores: Option<BTreeMap<String, f64>>,
    /// Logo image bytes; attached by the caller, never part of the JSON
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,
}

impl ReportModel {
    pub fn from_json_str(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The mandatory score, validated
    pub fn validated_score(&self) -> ReportResult<Score> {
        Score::new(self.score.ok_or(ReportError::MissingScore)?)
    }

    /// Premium payload, preferring the top-level field over the legacy
    /// copy inside `answers`
    pub fn premium(&self) -> Option<PremiumPayload> {
        match self.premium_analysis.as_ref().filter(|v| !v.is_null()) {
            Some(payload) => PremiumPayload::from_value(payload),
            None => self
                .answers
                .get("premiumAnalysis")
                .and_then(PremiumPayload::from_value),
        }
    }

    pub fn is_premium_tier(&self) -> bool {
        self.subscription_level.map_or(false, SubscriptionLevel::is_premium)
            || self.premium_analysis.is_some()
    }

    pub fn company_name(&self) -> Option<String> {
        self.company_name
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.answers.text("company_name"))
    }

    pub fn narrative_for(&self, key: &str) -> Option<&str> {
        self.narrative
            .get(key)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Tolerant field readers
///
/// Optional values in the wrong shape degrade to absent instead of
/// rejecting the whole model. Dropped values are logged.
mod lenient {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use log::warn;
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Scalar;

    pub fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn from_value_or_warn<T: DeserializeOwned>(value: Value) -> Option<T> {
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("ignoring malformed value: {}", e);
                None
            }
        }
    }

    fn list_items(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }

    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(from_value_or_warn(Value::deserialize(deserializer)?))
    }

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(from_value_or_warn(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    /// Strings, numbers and booleans as text
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(Value::deserialize(deserializer)?))
    }

    pub fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(text(deserializer)?.unwrap_or_default())
    }

    /// A lone string counts as a one-item list; blank items are dropped
    pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(list_items(Value::deserialize(deserializer)?)
            .into_iter()
            .filter_map(scalar_text)
            .filter(|s| !s.trim().is_empty())
            .collect())
    }

    /// Records that do not parse are dropped one by one
    pub fn item_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(list_items(Value::deserialize(deserializer)?)
            .into_iter()
            .filter_map(from_value_or_warn)
            .collect())
    }

    pub fn scalar_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Scalar>, D::Error> {
        let Value::Object(entries) = Value::deserialize(deserializer)? else {
            return Ok(BTreeMap::new());
        };
        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| from_value_or_warn(value).map(|v| (key, v)))
            .collect())
    }

    pub fn text_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, String>, D::Error> {
        let Value::Object(entries) = Value::deserialize(deserializer)? else {
            return Ok(BTreeMap::new());
        };
        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| scalar_text(value).map(|v| (key, v)))
            .collect())
    }

    /// `YYYY-MM-DD`, also taken from the front of a full timestamp
    pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let Some(raw) = text(deserializer)? else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        let day = trimmed.get(..10).unwrap_or(trimmed);
        match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(e) => {
                warn!("ignoring unreadable date '{}': {}", raw, e);
                Ok(None)
            }
        }
    }
}
