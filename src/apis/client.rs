/// Base HTTP plumbing: request pacing and the transport seam
use crate::config::GatewayConfig;
use crate::errors::TransportError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Header carrying the CoinGecko demo-tier key
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

// ============================================================================
// RATE LIMITER
// ============================================================================

/// Enforces a minimum spacing between outbound calls
///
/// The timestamp of the last call is taken when a call is issued, not when
/// its response arrives. The state lock is held across the wait, so callers
/// queue behind one another in issue order.
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait until a request may be issued and record its issue time
    ///
    /// Returns how long the caller was held back.
    pub async fn acquire(&self) -> Duration {
        let mut last = self.last_request.lock().await;
        let mut waited = Duration::ZERO;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                waited = self.min_interval - elapsed;
                tokio::time::sleep(waited).await;
            }
        }

        *last = Some(Instant::now());
        waited
    }

    /// Issue time of the most recent call, if any
    pub async fn last_request(&self) -> Option<Instant> {
        *self.last_request.lock().await
    }
}

// ============================================================================
// TRANSPORT
// ============================================================================

/// Raw provider answer: status code and undecoded body
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests against the market data provider
///
/// `path` is relative to the provider base URL. Implementations report any
/// received response, success or not, as `Ok`; `Err` means no response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<TransportResponse, TransportError> {
        (**self).get(path, query).await
    }
}

/// reqwest-backed transport with timeout and optional API key
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        api_key: Option<String>,
    ) -> Result<Self, String> {
        if timeout_secs == 0 {
            return Err("Timeout must be greater than zero".to_string());
        }

        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, String> {
        Self::new(&config.base_url, config.timeout_secs, config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<TransportResponse, TransportError> {
        let mut request = self
            .client
            .get(self.endpoint_url(path))
            .query(query)
            .header(ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();
        assert_eq!(limiter.acquire().await, Duration::ZERO);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.last_request().await, Some(start));
    }

    #[tokio::test(start_paused = true)]
    async fn second_acquire_waits_remaining_delta() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        limiter.acquire().await;
        let first = limiter.last_request().await.unwrap();

        tokio::time::advance(Duration::from_millis(300)).await;
        let waited = limiter.acquire().await;
        let second = limiter.last_request().await.unwrap();

        assert_eq!(waited, Duration::from_millis(700));
        assert!(second - first >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_after_interval_elapsed() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        limiter.acquire().await;
        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(limiter.acquire().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_are_spaced_by_issue_time() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(1)));
        let mut handles = Vec::new();
        for _ in 0..3 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                Instant::now()
            }));
        }

        let mut issued = Vec::new();
        for handle in handles {
            issued.push(handle.await.unwrap());
        }
        issued.sort();

        for pair in issued.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(1));
        }
    }

    #[test]
    fn transport_normalizes_urls() {
        let transport =
            HttpTransport::new("https://api.example.com/api/v3/", 5, Some("  ".to_string()))
                .unwrap();
        assert_eq!(transport.base_url(), "https://api.example.com/api/v3");
        assert_eq!(
            transport.endpoint_url("/coins/markets"),
            "https://api.example.com/api/v3/coins/markets"
        );
        assert!(transport.api_key.is_none());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(HttpTransport::new("https://api.example.com", 0, None).is_err());
    }

    #[test]
    fn success_range() {
        let ok = TransportResponse {
            status: 204,
            body: String::new(),
        };
        let missing = TransportResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
