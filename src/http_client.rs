use crate::error::FetchError;
use rand::Rng;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for the retrying HTTP client
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_retries: usize,
    pub initial_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
    pub rate_limit_delay_ms: u64,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 4,
            initial_retry_delay_ms: 500,
            max_retry_delay_ms: 8000,
            rate_limit_delay_ms: 250,
            user_agent: concat!("rust_manga_catalog/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// reqwest client with retry, exponential backoff and JSON decoding
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .default_headers(headers)
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()?;

        Ok(Self { client, config })
    }

    /// Calculate retry delay with exponential backoff and jitter
    fn calculate_retry_delay(&self, attempt: usize) -> Duration {
        let base_delay = self.config.initial_retry_delay_ms;
        let max_delay = self.config.max_retry_delay_ms;

        let delay_ms = base_delay
            .saturating_mul(2u64.saturating_pow(attempt as u32))
            .min(max_delay);

        // +/-25% so parallel callers do not retry in lockstep
        let jitter = rand::thread_rng().gen_range(0.75..=1.25);
        Duration::from_millis((delay_ms as f64 * jitter) as u64)
    }

    fn is_retryable_status(status: StatusCode) -> bool {
        matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
    }

    /// GET with query parameters, retrying rate limits, server errors and transport failures
    pub async fn get_with_retry(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<Response, FetchError> {
        let mut attempt = 0;
        loop {
            match self.client.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();
                    if Self::is_retryable_status(status) && attempt < self.config.max_retries {
                        log::warn!(
                            "Received retryable status {} for {}, attempt {}/{}",
                            status,
                            url,
                            attempt + 1,
                            self.config.max_retries + 1
                        );
                    } else if !status.is_success() {
                        return Err(FetchError::Status {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    } else {
                        return Ok(response);
                    }
                }
                Err(e) => {
                    let should_retry = e.is_timeout() || e.is_connect() || e.is_request();
                    if !should_retry || attempt >= self.config.max_retries {
                        return Err(FetchError::Http(e));
                    }
                    log::warn!(
                        "Request failed for {}, attempt {}/{}: {}",
                        url,
                        attempt + 1,
                        self.config.max_retries + 1,
                        e
                    );
                }
            }
            sleep(self.calculate_retry_delay(attempt)).await;
            attempt += 1;
        }
    }

    /// GET and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, FetchError> {
        let response = self.get_with_retry(url, query).await?;
        let text = response.text().await?;
        log::trace!("{} -> {} bytes", url, text.len());
        serde_json::from_str(&text).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Pause between paginated requests
    pub async fn rate_limit_delay(&self) {
        if self.config.rate_limit_delay_ms > 0 {
            sleep(Duration::from_millis(self.config.rate_limit_delay_ms)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_retry_delay_calculation() {
        let config = HttpClientConfig::default();
        let client = HttpClient::with_config(config).unwrap();

        let delay0 = client.calculate_retry_delay(0);
        let delay3 = client.calculate_retry_delay(3);
        let delay_far = client.calculate_retry_delay(40);

        // 500ms +/-25%, 4000ms +/-25%, capped at 8000ms +/-25%
        assert!(delay0.as_millis() >= 375 && delay0.as_millis() <= 625);
        assert!(delay3.as_millis() >= 3000 && delay3.as_millis() <= 5000);
        assert!(delay_far.as_millis() <= 10_000);
    }

    #[test]
    fn test_retryable_status() {
        assert!(HttpClient::is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(HttpClient::is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(HttpClient::is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!HttpClient::is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!HttpClient::is_retryable_status(StatusCode::BAD_REQUEST));
    }
}
