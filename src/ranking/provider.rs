use anyhow::Result;
use async_trait::async_trait;

use super::Ranking;

/// Trait that every ranking source must implement.
#[async_trait]
pub trait RankingProvider: Send + Sync {
    /// Return the full ranking table currently published by the source.
    async fn fetch_ranking(&self) -> Result<Ranking>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
