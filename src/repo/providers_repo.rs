use crate::catalog::CatalogSource;
use crate::domain::fees::FeeSchedule;
use crate::domain::profile::PaymentMethod;
use crate::domain::provider::{ProviderCapabilities, ProviderListing, ProviderRecord};
use anyhow::Result;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

#[derive(Clone)]
pub struct ProvidersRepo {
    pub pool: PgPool,
}

impl ProvidersRepo {
    pub async fn list_all(&self) -> Result<Vec<ProviderRecord>> {
        let rows = sqlx::query(
            "SELECT provider_id, display_name, is_active FROM providers ORDER BY display_name ASC, provider_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProviderRecord {
                provider_id: r.get("provider_id"),
                display_name: r.get("display_name"),
                is_active: r.get("is_active"),
            })
            .collect())
    }

    pub async fn set_active(&self, provider_id: &str, is_active: bool) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE providers SET is_active = $2, updated_at = now() WHERE provider_id = $1",
        )
        .bind(provider_id)
        .bind(is_active)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn load_active_listings(&self) -> Result<Vec<ProviderListing>> {
        let rows = sqlx::query(
            r#"
            SELECT p.provider_id, p.display_name, p.is_active,
                   c.supported_methods, c.recurring_billing, c.tokenization, c.multi_currency,
                   c.fast_settlement, c.wallet_support, c.buy_now_pay_later,
                   c.platform_integrations, c.activation_days_min, c.activation_days_max,
                   c.settlement_days_min, c.settlement_days_max, c.support_channels,
                   c.pros, c.cons
            FROM providers p
            JOIN provider_capabilities c ON c.provider_id = p.provider_id
            WHERE p.is_active = true
            ORDER BY p.display_name ASC, p.provider_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut listings: Vec<ProviderListing> = rows
            .into_iter()
            .map(|r| ProviderListing {
                provider: ProviderRecord {
                    provider_id: r.get("provider_id"),
                    display_name: r.get("display_name"),
                    is_active: r.get("is_active"),
                },
                capabilities: ProviderCapabilities {
                    supported_methods: parse_methods(r.get("supported_methods")),
                    recurring_billing: r.get("recurring_billing"),
                    tokenization: r.get("tokenization"),
                    multi_currency: r.get("multi_currency"),
                    fast_settlement: r.get("fast_settlement"),
                    wallet_support: r.get("wallet_support"),
                    buy_now_pay_later: r.get("buy_now_pay_later"),
                    platform_integrations: r.get("platform_integrations"),
                    activation_days_min: r.get("activation_days_min"),
                    activation_days_max: r.get("activation_days_max"),
                    settlement_days_min: r.get("settlement_days_min"),
                    settlement_days_max: r.get("settlement_days_max"),
                    support_channels: r.get("support_channels"),
                    pros: r.get("pros"),
                    cons: r.get("cons"),
                },
                schedules: Vec::new(),
            })
            .collect();

        let schedule_rows = sqlx::query(
            r#"
            SELECT s.provider_id, s.payment_method, s.percent_rate, s.fixed_fee_minor,
                   s.monthly_fee_minor, s.setup_fee_minor, s.refund_fee_percent,
                   s.refund_fee_fixed_minor, s.chargeback_fee_minor, s.cross_border_percent,
                   s.currency_conversion_percent, s.payout_fee_minor, s.min_fee_minor,
                   s.max_fee_minor, s.min_txn_minor, s.max_txn_minor, s.tier_label,
                   s.is_estimated, s.is_active, s.verified_at
            FROM fee_schedules s
            JOIN providers p ON p.provider_id = s.provider_id
            WHERE p.is_active = true AND s.is_active = true
            ORDER BY s.provider_id ASC, s.payment_method ASC, s.verified_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_provider: HashMap<String, Vec<FeeSchedule>> = HashMap::new();
        for r in schedule_rows {
            let method_label: String = r.get("payment_method");
            let Some(payment_method) = PaymentMethod::parse(&method_label) else {
                tracing::warn!(
                    provider_id = %r.get::<String, _>("provider_id"),
                    method = %method_label,
                    "unknown payment method on fee schedule, skipping"
                );
                continue;
            };
            let schedule = FeeSchedule {
                provider_id: r.get("provider_id"),
                payment_method,
                percent_rate: r.get("percent_rate"),
                fixed_fee_minor: r.get("fixed_fee_minor"),
                monthly_fee_minor: r.get("monthly_fee_minor"),
                setup_fee_minor: r.get("setup_fee_minor"),
                refund_fee_percent: r.get("refund_fee_percent"),
                refund_fee_fixed_minor: r.get("refund_fee_fixed_minor"),
                chargeback_fee_minor: r.get("chargeback_fee_minor"),
                cross_border_percent: r.get("cross_border_percent"),
                currency_conversion_percent: r.get("currency_conversion_percent"),
                payout_fee_minor: r.get("payout_fee_minor"),
                min_fee_minor: r.get("min_fee_minor"),
                max_fee_minor: r.get("max_fee_minor"),
                min_txn_minor: r.get("min_txn_minor"),
                max_txn_minor: r.get("max_txn_minor"),
                tier_label: r.get("tier_label"),
                is_estimated: r.get("is_estimated"),
                is_active: r.get("is_active"),
                verified_at: r.get("verified_at"),
            };
            by_provider
                .entry(schedule.provider_id.clone())
                .or_default()
                .push(schedule);
        }

        for listing in &mut listings {
            if let Some(schedules) = by_provider.remove(&listing.provider.provider_id) {
                listing.schedules = schedules;
            }
        }
        Ok(listings)
    }
}

#[async_trait::async_trait]
impl CatalogSource for ProvidersRepo {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn list_active(&self) -> Result<Vec<ProviderListing>> {
        self.load_active_listings().await
    }
}

fn parse_methods(labels: Vec<String>) -> Vec<PaymentMethod> {
    labels
        .iter()
        .filter_map(|label| {
            let parsed = PaymentMethod::parse(label);
            if parsed.is_none() {
                tracing::warn!(method = %label, "unknown payment method in capabilities, skipping");
            }
            parsed
        })
        .collect()
}
