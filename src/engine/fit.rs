use crate::domain::profile::TransactionProfile;
use crate::domain::provider::ProviderCapabilities;

#[derive(Debug, Clone)]
pub struct FitResult {
    pub score: f64,
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

impl FitResult {
    pub fn declared_count(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }
}

/// Fraction of the merchant's declared needs the provider satisfies, as a
/// 0-100 score. A profile with no declared needs fits every provider fully.
pub fn match_needs(profile: &TransactionProfile, caps: &ProviderCapabilities) -> FitResult {
    let needs = &profile.needs;
    let mut declared: Vec<(String, bool)> = Vec::new();
    for (name, wanted, supported) in [
        (
            "recurring_billing",
            needs.recurring_billing,
            caps.recurring_billing,
        ),
        ("tokenization", needs.tokenization, caps.tokenization),
        ("multi_currency", needs.multi_currency, caps.multi_currency),
        (
            "fast_settlement",
            needs.fast_settlement,
            caps.fast_settlement,
        ),
        ("wallet_support", needs.wallet_support, caps.wallet_support),
        (
            "buy_now_pay_later",
            needs.buy_now_pay_later,
            caps.buy_now_pay_later,
        ),
    ] {
        if wanted {
            declared.push((name.to_string(), supported));
        }
    }
    if let Some(platform) = &profile.platform {
        let supported = caps
            .platform_integrations
            .iter()
            .any(|p| p.eq_ignore_ascii_case(platform));
        declared.push((format!("platform:{platform}"), supported));
    }

    if declared.is_empty() {
        return FitResult {
            score: 100.0,
            matched: Vec::new(),
            unmatched: Vec::new(),
        };
    }

    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    for (name, supported) in declared {
        if supported {
            matched.push(name);
        } else {
            unmatched.push(name);
        }
    }
    let total = matched.len() + unmatched.len();
    FitResult {
        score: matched.len() as f64 / total as f64 * 100.0,
        matched,
        unmatched,
    }
}
