use crate::domain::fees::FeeSchedule;
use crate::domain::profile::{PaymentMethod, TransactionProfile};
use crate::domain::provider::ProviderListing;
use crate::domain::recommendation::{ExcludedProvider, Recommendation};
use crate::domain::weights::{ScoringWeights, WeightsError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub mod cost;
pub mod fit;
pub mod ops_risk;
pub mod rank;

/// Allowed drift when checking that mix shares sum to 100.
pub const MIX_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid profile field `{field}`: {reason}")]
    InvalidProfile {
        field: &'static str,
        reason: String,
    },
    #[error(transparent)]
    InvalidWeights(#[from] WeightsError),
}

impl EngineError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidProfile { field, .. } => Some(*field),
            Self::InvalidWeights(_) => None,
        }
    }
}

/// Everything one engine invocation produces. `run_id` assignment and
/// persistence belong to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub generated_at: DateTime<Utc>,
    pub weights: ScoringWeights,
    pub recommendations: Vec<Recommendation>,
    pub excluded: Vec<ExcludedProvider>,
}

/// Merchant-supplied financial inputs are rejected, never clamped or
/// renormalized.
pub fn validate_profile(profile: &TransactionProfile) -> Result<(), EngineError> {
    if profile.monthly_volume_minor < 0 {
        return Err(invalid("monthly_volume_minor", "must be >= 0"));
    }
    if profile.transaction_count < 0 {
        return Err(invalid("transaction_count", "must be >= 0"));
    }
    if profile.average_ticket_minor < 0 {
        return Err(invalid("average_ticket_minor", "must be >= 0"));
    }
    for (field, value) in [
        ("refund_rate_percent", profile.refund_rate_percent),
        ("chargeback_rate_percent", profile.chargeback_rate_percent),
        (
            "international_share_percent",
            profile.international_share_percent,
        ),
    ] {
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid(field, "must be between 0 and 100"));
        }
    }

    let mut seen = HashSet::new();
    let mut sum = 0.0;
    for entry in &profile.mix {
        if entry.share_percent <= 0.0 || entry.share_percent > 100.0 {
            return Err(invalid("mix", "each share must be in (0, 100]"));
        }
        if !seen.insert(entry.method) {
            return Err(invalid(
                "mix",
                &format!("duplicate payment method {}", entry.method.as_str()),
            ));
        }
        sum += entry.share_percent;
    }
    if (sum - 100.0).abs() > MIX_SUM_TOLERANCE {
        return Err(invalid(
            "mix",
            &format!("shares sum to {sum}, expected 100"),
        ));
    }
    Ok(())
}

/// Score one profile against a catalog snapshot. Pure and synchronous: the
/// timestamp is injected, nothing is fetched and nothing is persisted, so the
/// wizard, compare, and report-regeneration paths all share this exact
/// computation.
pub fn recommend(
    profile: &TransactionProfile,
    listings: &[ProviderListing],
    weights: &ScoringWeights,
    top_n: usize,
    generated_at: DateTime<Utc>,
) -> Result<RunOutcome, EngineError> {
    validate_profile(profile)?;
    // Load-time validation is the authoritative gate; this recheck keeps the
    // pure path safe when called with a hand-built vector.
    weights.validate()?;

    let mut candidates = Vec::new();
    let mut excluded = Vec::new();
    for listing in listings {
        if !listing.provider.is_active {
            continue;
        }
        let schedules = usable_schedules(listing);
        let cost = cost::compute(profile, &schedules);
        if cost.covered_share_percent <= 0.0 {
            tracing::debug!(
                provider_id = %listing.provider.provider_id,
                "provider excluded: no schedule covers any method in the mix"
            );
            excluded.push(ExcludedProvider {
                provider_id: listing.provider.provider_id.clone(),
                display_name: listing.provider.display_name.clone(),
                reason: "no fee schedule covers any payment method in the mix".to_string(),
            });
            continue;
        }
        let fit = fit::match_needs(profile, &listing.capabilities);
        let ops = ops_risk::OpsInputs::from_capabilities(&listing.capabilities);
        let risk = ops_risk::risk_score(&cost, generated_at);
        candidates.push(rank::Candidate {
            provider_id: listing.provider.provider_id.clone(),
            display_name: listing.provider.display_name.clone(),
            cost,
            fit,
            ops,
            risk,
        });
    }

    Ok(RunOutcome {
        generated_at,
        weights: weights.clone(),
        recommendations: rank::rank(candidates, weights, top_n),
        excluded,
    })
}

/// At most one schedule per method: active and structurally valid, most
/// recently verified wins. Invalid schedules are dropped with a diagnostic,
/// they never fail the run.
fn usable_schedules(listing: &ProviderListing) -> HashMap<PaymentMethod, FeeSchedule> {
    let mut by_method: HashMap<PaymentMethod, FeeSchedule> = HashMap::new();
    for schedule in &listing.schedules {
        if !schedule.is_active {
            continue;
        }
        if let Err(issue) = schedule.validate() {
            tracing::warn!(
                provider_id = %schedule.provider_id,
                method = schedule.payment_method.as_str(),
                %issue,
                "fee schedule excluded from run"
            );
            continue;
        }
        match by_method.entry(schedule.payment_method) {
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(schedule.clone());
            }
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                if schedule.verified_at > slot.get().verified_at {
                    slot.insert(schedule.clone());
                }
            }
        }
    }
    by_method
}

fn invalid(field: &'static str, reason: &str) -> EngineError {
    EngineError::InvalidProfile {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{DeclaredNeeds, MixShare};
    use chrono::TimeZone;

    fn profile() -> TransactionProfile {
        TransactionProfile {
            monthly_volume_minor: 5_000_000,
            transaction_count: 400,
            average_ticket_minor: 12_500,
            mix: vec![
                MixShare {
                    method: PaymentMethod::CreditCard,
                    share_percent: 70.0,
                },
                MixShare {
                    method: PaymentMethod::Pix,
                    share_percent: 30.0,
                },
            ],
            refund_rate_percent: 1.0,
            chargeback_rate_percent: 0.2,
            international_share_percent: 0.0,
            needs: DeclaredNeeds::default(),
            platform: None,
            locale: "pt-BR".to_string(),
        }
    }

    fn weights() -> ScoringWeights {
        ScoringWeights {
            cost_weight: 35.0,
            fit_weight: 30.0,
            ops_weight: 20.0,
            risk_weight: 15.0,
        }
    }

    #[test]
    fn accepts_valid_profile() {
        assert!(validate_profile(&profile()).is_ok());
    }

    #[test]
    fn rejects_mix_not_summing_to_hundred() {
        let mut p = profile();
        p.mix[0].share_percent = 50.0;
        let err = validate_profile(&p).unwrap_err();
        assert_eq!(err.field(), Some("mix"));
    }

    #[test]
    fn rejects_negative_volume() {
        let mut p = profile();
        p.monthly_volume_minor = -1;
        let err = validate_profile(&p).unwrap_err();
        assert_eq!(err.field(), Some("monthly_volume_minor"));
    }

    #[test]
    fn rejects_duplicate_mix_method() {
        let mut p = profile();
        p.mix = vec![
            MixShare {
                method: PaymentMethod::Pix,
                share_percent: 50.0,
            },
            MixShare {
                method: PaymentMethod::Pix,
                share_percent: 50.0,
            },
        ];
        let err = validate_profile(&p).unwrap_err();
        assert_eq!(err.field(), Some("mix"));
    }

    #[test]
    fn rejects_rate_above_hundred() {
        let mut p = profile();
        p.refund_rate_percent = 120.0;
        let err = validate_profile(&p).unwrap_err();
        assert_eq!(err.field(), Some("refund_rate_percent"));
    }

    #[test]
    fn tolerates_rounding_drift_in_mix() {
        let mut p = profile();
        p.mix[0].share_percent = 70.005;
        p.mix[1].share_percent = 29.999;
        assert!(validate_profile(&p).is_ok());
    }

    #[test]
    fn empty_catalog_yields_empty_run() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let outcome = recommend(&profile(), &[], &weights(), 3, now).unwrap();
        assert!(outcome.recommendations.is_empty());
        assert!(outcome.excluded.is_empty());
    }

    #[test]
    fn invalid_weights_refuse_to_score() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let bad = ScoringWeights {
            cost_weight: 50.0,
            fit_weight: 30.0,
            ops_weight: 20.0,
            risk_weight: 15.0,
        };
        assert!(recommend(&profile(), &[], &bad, 3, now).is_err());
    }
}
