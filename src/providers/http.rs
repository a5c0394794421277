use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::ProviderSettings,
    models::{Result, WalletMetrics, WrapError},
    providers::{
        client::MetricsProvider,
        resilience::{retry_with_backoff, RetryConfig},
    },
};

const API_KEY_HEADER: &str = "x-api-key";

/// Metrics provider backed by the wallet stats HTTP API.
///
/// `GET {base_url}/wallets/{address}/stats` returns a metrics record, either
/// bare or wrapped in `{ "data": ... }`.
pub struct HttpMetricsProvider {
    http_client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpMetricsProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = settings.api_key.as_deref().filter(|k| !k.is_empty()) {
            let value = HeaderValue::from_str(key)
                .map_err(|e| WrapError::ConfigError(format!("Invalid API key header: {}", e)))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig {
                max_attempts: settings.max_retries.max(1),
                base_delay: Duration::from_millis(settings.retry_base_delay_ms),
                ..Default::default()
            },
        })
    }

    pub fn stats_url(&self, address: &str) -> String {
        format!("{}/wallets/{}/stats", self.base_url, address)
    }

    async fn request_once(&self, url: &str) -> Result<WalletMetrics> {
        let response = self.http_client.get(url).send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        let record = match body {
            Value::Object(mut map) if map.get("data").map_or(false, Value::is_object) => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        };

        Ok(serde_json::from_value(record)?)
    }
}

#[async_trait]
impl MetricsProvider for HttpMetricsProvider {
    async fn fetch_metrics(&self, address: &str) -> Result<WalletMetrics> {
        let url = self.stats_url(address);
        debug!("Fetching wallet stats from {}", url);

        let url = url.as_str();
        let result = retry_with_backoff(
            &self.retry,
            &format!("fetch_metrics({})", address),
            move || self.request_once(url),
            WrapError::is_retryable,
        )
        .await;

        result.map_err(|e| match e {
            WrapError::HttpError(ref inner) if inner.is_timeout() => WrapError::ProviderTimeout {
                address: address.to_string(),
            },
            WrapError::ProviderTimeout { .. } | WrapError::AddressFetchFailed { .. } => e,
            other => WrapError::fetch_failed(address, other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f6e842";

    /// Serves the given (status, body) pairs in order, one per connection,
    /// repeating the last one once the list runs out.
    async fn serve(responses: Vec<(u16, String)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();

        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let n = hits_clone.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)].clone();

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => request.extend_from_slice(&buf[..read]),
                    }
                }

                let reply = format!(
                    "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn provider(base_url: &str, max_retries: u32) -> HttpMetricsProvider {
        HttpMetricsProvider::new(&ProviderSettings {
            base_url: base_url.to_string(),
            api_key: Some("test-key".to_string()),
            timeout_seconds: 5,
            max_retries,
            retry_base_delay_ms: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_stats_url_trims_trailing_slash() {
        let p = provider("https://metrics.example/api/", 1);
        assert_eq!(
            p.stats_url(ADDRESS),
            format!("https://metrics.example/api/wallets/{}/stats", ADDRESS)
        );
    }

    #[tokio::test]
    async fn test_fetch_metrics_success() {
        let body = r#"{"volume": 60000, "numTrades": 12, "winRatePercent": 50, "tokensInteracted": 8}"#;
        let (base_url, hits) = serve(vec![(200, body.to_string())]).await;

        let metrics = provider(&base_url, 3).fetch_metrics(ADDRESS).await.unwrap();

        assert_eq!(metrics.volume, rust_decimal::Decimal::from(60_000));
        assert_eq!(metrics.num_trades, 12);
        assert_eq!(metrics.win_trades(), 6);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_metrics_unwraps_data_envelope() {
        let body = r#"{"data": {"volume": "2500000", "numTrades": 3}}"#;
        let (base_url, _) = serve(vec![(200, body.to_string())]).await;

        let metrics = provider(&base_url, 1).fetch_metrics(ADDRESS).await.unwrap();
        assert_eq!(metrics.volume, rust_decimal::Decimal::from(2_500_000));
        assert_eq!(metrics.num_trades, 3);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let (base_url, hits) = serve(vec![
            (503, "{}".to_string()),
            (200, r#"{"volume": 10}"#.to_string()),
        ])
        .await;

        let metrics = provider(&base_url, 3).fetch_metrics(ADDRESS).await.unwrap();
        assert_eq!(metrics.volume, rust_decimal::Decimal::from(10));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_not_found_fails_without_retry() {
        let (base_url, hits) = serve(vec![(404, "{}".to_string())]).await;

        let err = provider(&base_url, 3).fetch_metrics(ADDRESS).await.unwrap_err();
        assert!(matches!(err, WrapError::AddressFetchFailed { ref address, .. } if address == ADDRESS));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
