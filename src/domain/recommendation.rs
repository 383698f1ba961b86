use crate::domain::profile::PaymentMethod;
use crate::domain::weights::ScoringWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineKind {
    PerTransaction,
    MonthlyFlat,
    OneTime,
}

/// One line of a provider's cost breakdown. Amounts are unrounded minor units;
/// rounding happens at presentation, never mid-calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdownLine {
    pub label: String,
    pub method: Option<PaymentMethod>,
    pub share_percent: f64,
    pub transactions: f64,
    pub amount_low_minor: f64,
    pub amount_high_minor: f64,
    pub kind: LineKind,
    pub estimated: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostRange {
    pub low_minor: f64,
    pub high_minor: f64,
}

impl CostRange {
    pub fn midpoint_minor(&self) -> f64 {
        (self.low_minor + self.high_minor) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub provider_id: String,
    pub display_name: String,
    pub rank: u32,
    pub cost: CostRange,
    pub setup_fee_minor: Option<i64>,
    pub cost_score: f64,
    pub fit_score: f64,
    pub ops_score: f64,
    pub risk_score: f64,
    pub total_score: f64,
    pub reasons: Vec<String>,
    pub caveats: Vec<String>,
    pub matched_needs: Vec<String>,
    pub unmatched_needs: Vec<String>,
    pub uncovered_methods: Vec<PaymentMethod>,
    pub breakdown: Vec<CostBreakdownLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedProvider {
    pub provider_id: String,
    pub display_name: String,
    pub reason: String,
}

/// A finished run: what downstream consumers persist, render to PDF, or
/// summarize over messaging. Carries the effective weight vector and the
/// generation timestamp so any consumer can audit which configuration
/// produced the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRun {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub weights: ScoringWeights,
    pub recommendations: Vec<Recommendation>,
    pub excluded: Vec<ExcludedProvider>,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}
