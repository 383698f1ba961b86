use crate::catalog::CatalogSource;
use crate::domain::fees::FeeSchedule;
use crate::domain::profile::PaymentMethod;
use crate::domain::provider::{ProviderCapabilities, ProviderListing, ProviderRecord};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

/// In-memory catalog used by the compare endpoint's fixture mode and by demo
/// environments without a seeded database. Feeds the same engine as the live
/// catalog.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog;

#[async_trait::async_trait]
impl CatalogSource for FixtureCatalog {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn list_active(&self) -> Result<Vec<ProviderListing>> {
        Ok(self.listings())
    }
}

impl FixtureCatalog {
    pub fn listings(&self) -> Vec<ProviderListing> {
        let now = Utc::now();
        let mut listings = vec![
            azulpag(now),
            norte_pay(now),
            vexo(now),
        ];
        listings.sort_by(|a, b| a.provider.display_name.cmp(&b.provider.display_name));
        listings
    }
}

fn schedule(
    provider_id: &str,
    method: PaymentMethod,
    percent_rate: f64,
    fixed_fee_minor: i64,
    verified_at: DateTime<Utc>,
) -> FeeSchedule {
    FeeSchedule {
        provider_id: provider_id.to_string(),
        payment_method: method,
        percent_rate,
        fixed_fee_minor,
        monthly_fee_minor: None,
        setup_fee_minor: None,
        refund_fee_percent: 0.0,
        refund_fee_fixed_minor: 0,
        chargeback_fee_minor: 1_500,
        cross_border_percent: 0.0,
        currency_conversion_percent: 0.0,
        payout_fee_minor: 0,
        min_fee_minor: None,
        max_fee_minor: None,
        min_txn_minor: None,
        max_txn_minor: None,
        tier_label: None,
        is_estimated: false,
        is_active: true,
        verified_at,
    }
}

/// Full-coverage all-rounder: every method, confirmed pricing, mid-range rates.
fn azulpag(now: DateTime<Utc>) -> ProviderListing {
    let id = "azulpag";
    let verified = now - Duration::days(20);
    let mut credit = schedule(id, PaymentMethod::CreditCard, 3.19, 0, verified);
    credit.refund_fee_percent = 100.0;
    let mut wallet = schedule(id, PaymentMethod::Wallet, 3.39, 0, verified);
    wallet.cross_border_percent = 2.0;
    wallet.currency_conversion_percent = 1.5;
    let mut boleto = schedule(id, PaymentMethod::Boleto, 0.0, 349, verified);
    boleto.min_fee_minor = Some(349);
    ProviderListing {
        provider: ProviderRecord {
            provider_id: id.to_string(),
            display_name: "AzulPag".to_string(),
            is_active: true,
        },
        capabilities: ProviderCapabilities {
            supported_methods: vec![
                PaymentMethod::CreditCard,
                PaymentMethod::DebitCard,
                PaymentMethod::Pix,
                PaymentMethod::Boleto,
                PaymentMethod::Wallet,
            ],
            recurring_billing: true,
            tokenization: true,
            multi_currency: true,
            fast_settlement: false,
            wallet_support: true,
            buy_now_pay_later: false,
            platform_integrations: vec![
                "woocommerce".to_string(),
                "shopify".to_string(),
                "vtex".to_string(),
            ],
            activation_days_min: 2,
            activation_days_max: 5,
            settlement_days_min: 1,
            settlement_days_max: 2,
            support_channels: vec![
                "chat".to_string(),
                "email".to_string(),
                "phone".to_string(),
            ],
            pros: vec![
                "covers every payment method".to_string(),
                "broad platform integrations".to_string(),
            ],
            cons: vec!["not the cheapest card rate".to_string()],
        },
        schedules: vec![
            credit,
            schedule(id, PaymentMethod::DebitCard, 1.99, 0, verified),
            schedule(id, PaymentMethod::Pix, 0.99, 0, verified),
            boleto,
            wallet,
        ],
    }
}

/// Cheapest card rates, but partly estimated and last verified a while ago.
fn norte_pay(now: DateTime<Utc>) -> ProviderListing {
    let id = "norte-pay";
    let stale = now - Duration::days(140);
    let mut credit = schedule(id, PaymentMethod::CreditCard, 2.49, 0, stale);
    credit.is_estimated = true;
    let mut pix = schedule(id, PaymentMethod::Pix, 0.75, 0, stale);
    pix.payout_fee_minor = 190;
    ProviderListing {
        provider: ProviderRecord {
            provider_id: id.to_string(),
            display_name: "NortePay".to_string(),
            is_active: true,
        },
        capabilities: ProviderCapabilities {
            supported_methods: vec![
                PaymentMethod::CreditCard,
                PaymentMethod::DebitCard,
                PaymentMethod::Pix,
            ],
            recurring_billing: false,
            tokenization: false,
            multi_currency: false,
            fast_settlement: false,
            wallet_support: false,
            buy_now_pay_later: false,
            platform_integrations: vec!["woocommerce".to_string()],
            activation_days_min: 5,
            activation_days_max: 10,
            settlement_days_min: 2,
            settlement_days_max: 14,
            support_channels: vec!["email".to_string()],
            pros: vec!["lowest advertised card rate".to_string()],
            cons: vec![
                "pricing not recently verified".to_string(),
                "slow settlement on cards".to_string(),
            ],
        },
        schedules: vec![
            credit,
            schedule(id, PaymentMethod::DebitCard, 1.89, 0, stale),
            pix,
        ],
    }
}

/// Subscription-commerce specialist: recurring billing and tokenization, with
/// a monthly fee and setup cost.
fn vexo(now: DateTime<Utc>) -> ProviderListing {
    let id = "vexo";
    let verified = now - Duration::days(7);
    let mut credit = schedule(id, PaymentMethod::CreditCard, 2.89, 30, verified);
    credit.monthly_fee_minor = Some(14_900);
    credit.setup_fee_minor = Some(49_900);
    credit.tier_label = Some("scale".to_string());
    let mut pix = schedule(id, PaymentMethod::Pix, 0.89, 0, verified);
    pix.monthly_fee_minor = Some(14_900);
    ProviderListing {
        provider: ProviderRecord {
            provider_id: id.to_string(),
            display_name: "Vexo Pagamentos".to_string(),
            is_active: true,
        },
        capabilities: ProviderCapabilities {
            supported_methods: vec![PaymentMethod::CreditCard, PaymentMethod::Pix],
            recurring_billing: true,
            tokenization: true,
            multi_currency: false,
            fast_settlement: true,
            wallet_support: false,
            buy_now_pay_later: true,
            platform_integrations: vec!["vtex".to_string(), "nuvemshop".to_string()],
            activation_days_min: 1,
            activation_days_max: 2,
            settlement_days_min: 1,
            settlement_days_max: 1,
            support_channels: vec!["chat".to_string(), "phone".to_string()],
            pros: vec![
                "built for recurring billing".to_string(),
                "next-day settlement".to_string(),
            ],
            cons: vec!["monthly subscription fee".to_string()],
        },
        schedules: vec![credit, pix],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_is_sorted_and_active() {
        let listings = FixtureCatalog.listings();
        assert_eq!(listings.len(), 3);
        let names: Vec<&str> = listings
            .iter()
            .map(|l| l.provider.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["AzulPag", "NortePay", "Vexo Pagamentos"]);
        assert!(listings.iter().all(|l| l.provider.is_active));
    }

    #[test]
    fn fixture_schedules_are_structurally_valid() {
        for listing in FixtureCatalog.listings() {
            for schedule in &listing.schedules {
                assert!(schedule.validate().is_ok(), "{}", schedule.provider_id);
            }
        }
    }
}
