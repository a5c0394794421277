pub mod client;
pub mod http;
pub mod fixture;
pub mod cache;
pub mod resilience;

pub use client::MetricsProvider;
pub use http::HttpMetricsProvider;
pub use fixture::StaticMetricsProvider;
pub use cache::{CachedMetricsProvider, MetricsCache};
pub use resilience::{retry_with_backoff, RetryConfig};
