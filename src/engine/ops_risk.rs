use crate::domain::provider::ProviderCapabilities;
use crate::engine::cost::ProviderCost;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Verification older than this starts accruing a risk penalty.
pub const STALE_AFTER_DAYS: i64 = 90;
/// Penalty per started 30-day period past the staleness threshold.
pub const STALE_PENALTY_STEP: f64 = 10.0;
pub const STALE_PENALTY_CAP: f64 = 50.0;
/// Maximum penalty when every contributing fee line is estimated.
pub const ESTIMATED_SHARE_PENALTY: f64 = 50.0;
/// Ops bonus per distinct support channel.
pub const SUPPORT_CHANNEL_BONUS: f64 = 5.0;

/// Raw operational inputs for one candidate. Normalization against the
/// candidate set happens in the ranking stage, which is the first place the
/// full set is known.
#[derive(Debug, Clone)]
pub struct OpsInputs {
    pub activation_mid_days: f64,
    pub settlement_mid_days: f64,
    pub support_channels: usize,
}

impl OpsInputs {
    pub fn from_capabilities(caps: &ProviderCapabilities) -> Self {
        let distinct: BTreeSet<String> = caps
            .support_channels
            .iter()
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            activation_mid_days: f64::from(caps.activation_days_min + caps.activation_days_max)
                / 2.0,
            settlement_mid_days: f64::from(caps.settlement_days_min + caps.settlement_days_max)
                / 2.0,
            support_channels: distinct.len(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RiskResult {
    pub score: f64,
    pub stale: bool,
}

pub fn risk_score(cost: &ProviderCost, now: DateTime<Utc>) -> RiskResult {
    let mut penalty = 0.0;
    let mut stale = false;
    if let Some(oldest) = cost.oldest_verified_at {
        let age_days = (now - oldest).num_days();
        if age_days > STALE_AFTER_DAYS {
            let over = age_days - STALE_AFTER_DAYS;
            let started_periods = (over + 29) / 30;
            penalty += (started_periods as f64 * STALE_PENALTY_STEP).min(STALE_PENALTY_CAP);
            stale = true;
        }
    }
    if cost.contributing_schedules > 0 {
        penalty += ESTIMATED_SHARE_PENALTY * cost.estimated_schedules as f64
            / cost.contributing_schedules as f64;
    }
    RiskResult {
        score: (100.0 - penalty).max(0.0),
        stale,
    }
}
