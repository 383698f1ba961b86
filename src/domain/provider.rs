use crate::domain::fees::FeeSchedule;
use crate::domain::profile::PaymentMethod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub provider_id: String,
    pub display_name: String,
    pub is_active: bool,
}

/// Declared capability flags and operational metadata for one provider.
/// Maintained by the admin surface; the engine only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub supported_methods: Vec<PaymentMethod>,
    pub recurring_billing: bool,
    pub tokenization: bool,
    pub multi_currency: bool,
    pub fast_settlement: bool,
    pub wallet_support: bool,
    pub buy_now_pay_later: bool,
    /// Explicit e-commerce platform integrations. Platform needs match against
    /// these entries, never against a generic "supports plugins" signal.
    pub platform_integrations: Vec<String>,
    pub activation_days_min: i32,
    pub activation_days_max: i32,
    pub settlement_days_min: i32,
    pub settlement_days_max: i32,
    pub support_channels: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Owned snapshot of one provider as the engine sees it for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderListing {
    pub provider: ProviderRecord,
    pub capabilities: ProviderCapabilities,
    pub schedules: Vec<FeeSchedule>,
}
