use async_trait::async_trait;

use crate::models::{Result, WalletMetrics};

/// Source of per-wallet trading summaries.
///
/// Any error returned for an address means that address is left out of the
/// aggregate; it never aborts the other lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Fetch the trading summary for a single address
    async fn fetch_metrics(&self, address: &str) -> Result<WalletMetrics>;
}
