pub mod thresholds;
pub mod classifier;
pub mod aggregator;
pub mod generator;

pub use thresholds::ArchetypeThresholds;
pub use classifier::ArchetypeClassifier;
pub use aggregator::{aggregate_metrics, MetricAggregator};
pub use generator::WrapGenerator;
