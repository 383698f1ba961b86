use crate::domain::weights::ScoringWeights;
use crate::repo::weights_repo::WeightsRepo;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// TTL cache over the admin-editable weight vector so the hot scoring path
/// does not hit the database per run. Validation happens in the repo load, so
/// a cached vector is always a valid one.
#[derive(Clone)]
pub struct ConfigCache {
    pub weights_repo: WeightsRepo,
    inner: Arc<RwLock<Option<(std::time::Instant, ScoringWeights)>>>,
    ttl: std::time::Duration,
}

impl ConfigCache {
    pub fn new(weights_repo: WeightsRepo, ttl: std::time::Duration) -> Self {
        Self {
            weights_repo,
            inner: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub async fn scoring_weights(&self) -> Result<ScoringWeights> {
        {
            let read = self.inner.read().await;
            if let Some((loaded_at, weights)) = &*read {
                if loaded_at.elapsed() <= self.ttl {
                    return Ok(weights.clone());
                }
            }
        }

        let weights = self.weights_repo.load().await?;
        let mut write = self.inner.write().await;
        *write = Some((std::time::Instant::now(), weights.clone()));
        Ok(weights)
    }

    /// Drops the cached vector so the next run sees a fresh load.
    pub async fn invalidate(&self) {
        let mut write = self.inner.write().await;
        *write = None;
    }
}
