use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::{
    models::{normalize_address, Result, WalletMetrics, WrapError},
    providers::client::MetricsProvider,
};

/// Serves metrics from memory, for offline runs and tests.
///
/// A fixture file is a JSON object keyed by address:
///
/// ```json
/// { "0xabc...": { "volume": 60000, "numTrades": 12 } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMetricsProvider {
    wallets: HashMap<String, WalletMetrics>,
}

impl StaticMetricsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet(mut self, address: &str, metrics: WalletMetrics) -> Self {
        self.insert(address, metrics);
        self
    }

    pub fn insert(&mut self, address: &str, metrics: WalletMetrics) {
        self.wallets.insert(normalize_address(address), metrics);
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, WalletMetrics> = serde_json::from_str(json)?;
        let mut provider = Self::new();
        for (address, metrics) in raw {
            provider.insert(&address, metrics);
        }
        Ok(provider)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let provider = Self::from_json_str(&contents)?;
        info!("Loaded {} wallet fixtures from {}", provider.len(), path.as_ref().display());
        Ok(provider)
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

#[async_trait]
impl MetricsProvider for StaticMetricsProvider {
    async fn fetch_metrics(&self, address: &str) -> Result<WalletMetrics> {
        self.wallets
            .get(&normalize_address(address))
            .cloned()
            .ok_or_else(|| WrapError::fetch_failed(address, "no metrics recorded for address"))
    }
}
