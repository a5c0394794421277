use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    models::{AggregatedMetrics, Result, WalletAddress, WalletMetrics, WrapError},
    providers::MetricsProvider,
};

/// Fetches every address and folds the successful results into one
/// portfolio-level metric set.
pub struct MetricAggregator {
    provider: Arc<dyn MetricsProvider>,
}

impl MetricAggregator {
    pub fn new(provider: Arc<dyn MetricsProvider>) -> Self {
        Self { provider }
    }

    /// Query all addresses concurrently and wait for every lookup to settle.
    ///
    /// Failed lookups are logged and dropped. Results are folded in the order
    /// the addresses were given, so ties between extremes go to the earlier
    /// address. Fails with `NoDataFound` when no lookup succeeded.
    pub async fn aggregate(&self, addresses: &[WalletAddress]) -> Result<AggregatedMetrics> {
        let fetches = addresses.iter().map(|address| {
            let provider = self.provider.clone();
            async move { (address, provider.fetch_metrics(address.as_str()).await) }
        });

        let mut successful = Vec::with_capacity(addresses.len());
        for (address, result) in join_all(fetches).await {
            match result {
                Ok(metrics) => {
                    info!("Fetched metrics for {}", address);
                    successful.push(metrics);
                }
                Err(e) => {
                    warn!("Dropping {} from aggregation: {}", address, e);
                }
            }
        }

        info!(
            "Fetched metrics for {}/{} addresses",
            successful.len(),
            addresses.len()
        );

        aggregate_metrics(&successful)
    }
}

/// Fold already-fetched wallet summaries. Empty input is `NoDataFound`.
pub fn aggregate_metrics(results: &[WalletMetrics]) -> Result<AggregatedMetrics> {
    if results.is_empty() {
        return Err(WrapError::NoDataFound);
    }

    let mut aggregated = AggregatedMetrics::default();
    for metrics in results {
        aggregated.merge(metrics);
    }
    Ok(aggregated)
}
