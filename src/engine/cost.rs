use crate::domain::fees::FeeSchedule;
use crate::domain::profile::{PaymentMethod, TransactionProfile};
use crate::domain::recommendation::{CostBreakdownLine, CostRange, LineKind};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Multiplier applied to the aggregate total when any contributing fee line is
/// estimated rather than verified.
pub const ESTIMATE_UNCERTAINTY: f64 = 1.15;

#[derive(Debug, Clone)]
pub struct ProviderCost {
    pub lines: Vec<CostBreakdownLine>,
    pub recurring: CostRange,
    pub setup_fee_minor: Option<i64>,
    pub covered_share_percent: f64,
    pub uncovered_methods: Vec<PaymentMethod>,
    pub contributing_schedules: usize,
    pub estimated_schedules: usize,
    pub oldest_verified_at: Option<DateTime<Utc>>,
}

impl ProviderCost {
    pub fn uses_estimates(&self) -> bool {
        self.estimated_schedules > 0
    }

    pub fn midpoint_minor(&self) -> f64 {
        self.recurring.midpoint_minor()
    }
}

/// Expected monthly cost for one provider against one profile. Pure: same
/// inputs always produce the same breakdown. `schedules` holds at most one
/// active, structurally valid schedule per payment method.
pub fn compute(
    profile: &TransactionProfile,
    schedules: &HashMap<PaymentMethod, FeeSchedule>,
) -> ProviderCost {
    let mut lines = Vec::new();
    let mut uncovered_methods = Vec::new();
    let mut contributing: Vec<&FeeSchedule> = Vec::new();
    let mut covered_share_percent = 0.0;
    let mut total = 0.0;

    for entry in &profile.mix {
        let Some(schedule) = schedules.get(&entry.method) else {
            // Uncovered slice: zero cost here, but the ranking stage must treat
            // it as a coverage penalty, never as an advantage.
            uncovered_methods.push(entry.method);
            continue;
        };
        covered_share_percent += entry.share_percent;
        contributing.push(schedule);

        let share = entry.share_percent / 100.0;
        let attributed_volume = profile.monthly_volume_minor as f64 * share;
        let attributed_txns = profile.transaction_count as f64 * share;

        let mut processing = attributed_txns * schedule.fixed_fee_minor as f64
            + attributed_volume * schedule.percent_rate / 100.0;
        if attributed_txns > 0.0 {
            // Caps are defined per transaction, but the profile carries no
            // transaction-level distribution, so the clamp is applied to the
            // slice's per-transaction average. Approximation, kept on purpose.
            let average = processing / attributed_txns;
            processing =
                clamp_average_fee(average, schedule.min_fee_minor, schedule.max_fee_minor)
                    * attributed_txns;
        }

        let refund_share = profile.refund_rate_percent / 100.0;
        let refunds = attributed_volume * refund_share * schedule.refund_fee_percent / 100.0
            + schedule.refund_fee_fixed_minor as f64 * refund_share * attributed_txns;
        let chargebacks = profile.chargeback_rate_percent / 100.0
            * attributed_txns
            * schedule.chargeback_fee_minor as f64;
        let international = attributed_volume * profile.international_share_percent / 100.0
            * (schedule.cross_border_percent + schedule.currency_conversion_percent)
            / 100.0;

        let amount = processing + refunds + chargebacks + international;
        lines.push(CostBreakdownLine {
            label: entry.method.as_str().to_string(),
            method: Some(entry.method),
            share_percent: entry.share_percent,
            transactions: attributed_txns,
            amount_low_minor: amount,
            amount_high_minor: if schedule.is_estimated {
                amount * ESTIMATE_UNCERTAINTY
            } else {
                amount
            },
            kind: LineKind::PerTransaction,
            estimated: schedule.is_estimated,
        });
        total += amount;
    }

    // Subscription-style fees are billed once per provider, not once per
    // method; the largest value across contributing schedules wins.
    if let Some(schedule) = contributing
        .iter()
        .copied()
        .filter(|s| s.monthly_fee_minor.unwrap_or(0) > 0)
        .max_by_key(|s| s.monthly_fee_minor.unwrap_or(0))
    {
        let fee = schedule.monthly_fee_minor.unwrap_or(0) as f64;
        lines.push(flat_line("monthly fee", fee, schedule.is_estimated));
        total += fee;
    }
    if let Some(schedule) = contributing
        .iter()
        .copied()
        .filter(|s| s.payout_fee_minor > 0)
        .max_by_key(|s| s.payout_fee_minor)
    {
        let fee = schedule.payout_fee_minor as f64;
        lines.push(flat_line("payout fee", fee, schedule.is_estimated));
        total += fee;
    }

    // Setup is one-time: surfaced on its own line and field, excluded from the
    // recurring range.
    let setup = contributing
        .iter()
        .copied()
        .filter(|s| s.setup_fee_minor.unwrap_or(0) > 0)
        .max_by_key(|s| s.setup_fee_minor.unwrap_or(0));
    let setup_fee_minor = setup.and_then(|s| s.setup_fee_minor);
    if let Some(schedule) = setup {
        let fee = schedule.setup_fee_minor.unwrap_or(0) as f64;
        lines.push(CostBreakdownLine {
            label: "setup fee".to_string(),
            method: None,
            share_percent: 0.0,
            transactions: 0.0,
            amount_low_minor: fee,
            amount_high_minor: fee,
            kind: LineKind::OneTime,
            estimated: schedule.is_estimated,
        });
    }

    let estimated_schedules = contributing.iter().filter(|s| s.is_estimated).count();
    let high = if estimated_schedules > 0 {
        total * ESTIMATE_UNCERTAINTY
    } else {
        total
    };

    ProviderCost {
        lines,
        recurring: CostRange {
            low_minor: total,
            high_minor: high,
        },
        setup_fee_minor,
        covered_share_percent,
        uncovered_methods,
        contributing_schedules: contributing.len(),
        estimated_schedules,
        oldest_verified_at: contributing.iter().map(|s| s.verified_at).min(),
    }
}

fn flat_line(label: &str, amount: f64, estimated: bool) -> CostBreakdownLine {
    CostBreakdownLine {
        label: label.to_string(),
        method: None,
        share_percent: 0.0,
        transactions: 0.0,
        amount_low_minor: amount,
        amount_high_minor: amount,
        kind: LineKind::MonthlyFlat,
        estimated,
    }
}

fn clamp_average_fee(average: f64, min_fee: Option<i64>, max_fee: Option<i64>) -> f64 {
    let mut fee = average;
    if let Some(max) = max_fee {
        fee = fee.min(max as f64);
    }
    if let Some(min) = min_fee {
        fee = fee.max(min as f64);
    }
    fee
}
