use std::sync::Arc;
use tracing::info;

use crate::{
    engine::{aggregate_metrics, ArchetypeClassifier, ArchetypeThresholds, MetricAggregator},
    models::{AggregatedMetrics, Result, WalletAddress, WalletMetrics, WrapError, WrapSummary},
    providers::MetricsProvider,
};

/// Runs the full pipeline: fetch, aggregate, classify, summarize.
pub struct WrapGenerator {
    aggregator: MetricAggregator,
    classifier: ArchetypeClassifier,
}

impl WrapGenerator {
    pub fn new(provider: Arc<dyn MetricsProvider>, thresholds: ArchetypeThresholds) -> Self {
        Self {
            aggregator: MetricAggregator::new(provider),
            classifier: ArchetypeClassifier::new(thresholds),
        }
    }

    pub async fn generate(&self, addresses: &[WalletAddress]) -> Result<WrapSummary> {
        if addresses.is_empty() {
            return Err(WrapError::InvalidAddress("no addresses provided".to_string()));
        }

        info!("Generating wrap for {} address(es)", addresses.len());

        let metrics = self.aggregator.aggregate(addresses).await?;
        let short_addresses = addresses.iter().map(WalletAddress::short).collect();

        Ok(self.summarize(&metrics, short_addresses))
    }

    /// Classify metrics that were fetched elsewhere.
    pub fn generate_offline(&self, wallets: &[WalletMetrics]) -> Result<WrapSummary> {
        let metrics = aggregate_metrics(wallets)?;
        Ok(self.summarize(&metrics, Vec::new()))
    }

    fn summarize(&self, metrics: &AggregatedMetrics, addresses: Vec<String>) -> WrapSummary {
        let archetype = self.classifier.classify(metrics);
        info!(
            "Wallets counted: {}, archetype: {}",
            metrics.wallets_counted,
            archetype
        );
        WrapSummary::new(archetype, metrics, addresses)
    }
}
