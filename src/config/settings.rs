use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;
use std::time::Duration;

use crate::engine::ArchetypeThresholds;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub provider: ProviderSettings,
    pub cache: CacheSettings,
    pub classifier: ArchetypeThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Upstream wallet metrics API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Wallet Wrap".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
                environment: Environment::Development,
            },
            provider: ProviderSettings {
                base_url: "http://localhost:8787/api".to_string(),
                api_key: None,
                timeout_seconds: 30,
                max_retries: 3,
                retry_base_delay_ms: 250,
            },
            cache: CacheSettings {
                enabled: false,
                ttl_seconds: 300, // 5 minutes
            },
            classifier: ArchetypeThresholds::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("WALLET_WRAP").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.provider.timeout_seconds == 0 {
            return Err("Provider timeout must be greater than zero".to_string());
        }

        if self.provider.base_url.trim().is_empty() {
            return Err("Provider base_url must not be empty".to_string());
        }

        self.classifier.validate()
    }
}
