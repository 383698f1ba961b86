use crate::domain::provider::ProviderListing;
use anyhow::Result;

pub mod fixture;

/// Where a run's provider snapshot comes from. The engine never branches on
/// deployment mode; the call site picks a source and the same pure pipeline
/// runs against it.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Active providers with their capabilities and fee schedules, as an owned
    /// snapshot for one run. Ordered by display name for deterministic output.
    async fn list_active(&self) -> Result<Vec<ProviderListing>>;
}
