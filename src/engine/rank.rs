use crate::domain::recommendation::Recommendation;
use crate::domain::weights::ScoringWeights;
use crate::engine::cost::ProviderCost;
use crate::engine::fit::FitResult;
use crate::engine::ops_risk::{OpsInputs, RiskResult, STALE_AFTER_DAYS, SUPPORT_CHANNEL_BONUS};

/// One scoreable provider: everything the per-candidate stages produced.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub provider_id: String,
    pub display_name: String,
    pub cost: ProviderCost,
    pub fit: FitResult,
    pub ops: OpsInputs,
    pub risk: RiskResult,
}

impl Candidate {
    /// Cost midpoint extrapolated over the full mix, so a provider that covers
    /// only part of the volume never reads as cheap against full-coverage
    /// candidates.
    fn adjusted_midpoint(&self) -> f64 {
        self.cost.midpoint_minor() / (self.cost.covered_share_percent / 100.0)
    }
}

/// Descending normalization: the smallest value maps to 100, the largest to 0.
/// A degenerate spread means no candidate distinguishes itself, everyone gets
/// full marks.
fn normalize_desc(value: f64, min: f64, max: f64) -> f64 {
    if max - min == 0.0 {
        100.0
    } else {
        100.0 * (max - value) / (max - min)
    }
}

struct Scored {
    candidate: Candidate,
    cost_score: f64,
    fit_score: f64,
    ops_score: f64,
    activation_norm: f64,
    settlement_norm: f64,
    total_score: f64,
    midpoint: f64,
}

/// Normalize across the candidate set, blend with the weight vector, sort with
/// full tie-breaking, keep the top N. This stage is a barrier: cost and ops
/// normalization need the whole set's min/max before any score is final.
pub fn rank(candidates: Vec<Candidate>, weights: &ScoringWeights, top_n: usize) -> Vec<Recommendation> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let mids: Vec<f64> = candidates.iter().map(Candidate::adjusted_midpoint).collect();
    let (mid_min, mid_max) = spread(&mids);
    let activations: Vec<f64> = candidates.iter().map(|c| c.ops.activation_mid_days).collect();
    let (act_min, act_max) = spread(&activations);
    let settlements: Vec<f64> = candidates.iter().map(|c| c.ops.settlement_mid_days).collect();
    let (settle_min, settle_max) = spread(&settlements);

    let mut scored: Vec<Scored> = candidates
        .into_iter()
        .map(|candidate| {
            let cost_score = normalize_desc(candidate.adjusted_midpoint(), mid_min, mid_max);
            let activation_norm =
                normalize_desc(candidate.ops.activation_mid_days, act_min, act_max);
            let settlement_norm =
                normalize_desc(candidate.ops.settlement_mid_days, settle_min, settle_max);
            let ops_score = ((activation_norm + settlement_norm) / 2.0
                + SUPPORT_CHANNEL_BONUS * candidate.ops.support_channels as f64)
                .min(100.0);
            // Coverage gaps land on the fit dimension: a provider unable to
            // process part of the mix is a worse fit, never a cheaper option.
            let fit_score = candidate.fit.score * candidate.cost.covered_share_percent / 100.0;
            let risk_score = candidate.risk.score;
            let total_score = (cost_score * weights.cost_weight
                + fit_score * weights.fit_weight
                + ops_score * weights.ops_weight
                + risk_score * weights.risk_weight)
                / 100.0;
            let midpoint = candidate.cost.midpoint_minor();
            Scored {
                candidate,
                cost_score,
                fit_score,
                ops_score,
                activation_norm,
                settlement_norm,
                total_score,
                midpoint,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.total_score
            .total_cmp(&a.total_score)
            .then(a.midpoint.total_cmp(&b.midpoint))
            .then_with(|| a.candidate.display_name.cmp(&b.candidate.display_name))
    });
    scored.truncate(top_n);

    scored
        .into_iter()
        .enumerate()
        .map(|(index, s)| {
            let (reasons, caveats) = annotate(&s);
            Recommendation {
                provider_id: s.candidate.provider_id,
                display_name: s.candidate.display_name,
                rank: index as u32 + 1,
                cost: s.candidate.cost.recurring,
                setup_fee_minor: s.candidate.cost.setup_fee_minor,
                cost_score: s.cost_score,
                fit_score: s.fit_score,
                ops_score: s.ops_score,
                risk_score: s.candidate.risk.score,
                total_score: s.total_score,
                reasons,
                caveats,
                matched_needs: s.candidate.fit.matched,
                unmatched_needs: s.candidate.fit.unmatched,
                uncovered_methods: s.candidate.cost.uncovered_methods,
                breakdown: s.candidate.cost.lines,
            }
        })
        .collect()
}

/// Rule-based annotations. Every rule maps one computed condition to one fixed
/// message; reasons come before caveats, and both run in dimension order
/// (cost, fit, ops, risk) so output ordering is stable across runs.
fn annotate(s: &Scored) -> (Vec<String>, Vec<String>) {
    let mut reasons = Vec::new();
    let mut caveats = Vec::new();

    if s.cost_score == 100.0 {
        reasons.push("lowest estimated cost in comparison set".to_string());
    }
    if s.candidate.fit.score == 100.0 && s.candidate.fit.declared_count() > 0 {
        reasons.push("supports all declared requirements".to_string());
    }
    if s.activation_norm == 100.0 {
        reasons.push("fastest activation in comparison set".to_string());
    }
    if s.settlement_norm == 100.0 {
        reasons.push("fastest settlement in comparison set".to_string());
    }
    if s.candidate.risk.score == 100.0 {
        reasons.push("pricing fully verified".to_string());
    }

    if s.candidate.cost.uses_estimates() {
        caveats.push("pricing partially estimated".to_string());
    }
    if !s.candidate.cost.uncovered_methods.is_empty() {
        let methods: Vec<&str> = s
            .candidate
            .cost
            .uncovered_methods
            .iter()
            .map(|m| m.as_str())
            .collect();
        caveats.push(format!("cannot process: {}", methods.join(", ")));
    }
    if !s.candidate.fit.unmatched.is_empty() {
        caveats.push(format!(
            "missing requirements: {}",
            s.candidate.fit.unmatched.join(", ")
        ));
    }
    if s.candidate.risk.stale {
        caveats.push(format!(
            "pricing last verified more than {STALE_AFTER_DAYS} days ago"
        ));
    }

    (reasons, caveats)
}

fn spread(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}
