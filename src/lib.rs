pub mod models;
pub mod config;
pub mod engine;
pub mod providers;
pub mod utils;

pub use models::{
    AggregatedMetrics, Archetype, WalletAddress, WalletMetrics, WrapSummary, WrapError, Result,
};
pub use config::Settings;
pub use engine::{ArchetypeClassifier, ArchetypeThresholds, MetricAggregator, WrapGenerator};

// Re-export commonly used types
pub use rust_decimal::Decimal;
