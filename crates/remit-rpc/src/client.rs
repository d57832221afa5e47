//! Base JSON HTTP client for the wallet API.
//!
//! Provides `get()` with retry on transient failures and `post()` without
//! retry: a POST may have reached the server even when the response was
//! lost, so repeating it is left to the caller.

use crate::error::RpcError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Configuration for an API client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL (e.g., `https://api.example.com`).
    pub url: String,
    /// Request timeout; the only way a pending submission is abandoned.
    pub timeout: Duration,
    /// Number of retry attempts for GET requests on transient failure.
    pub retries: u32,
    /// Initial delay between retries (doubles each attempt).
    pub retry_delay: Duration,
    pub user_agent: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
            retries: 2,
            retry_delay: Duration::from_millis(500),
            user_agent: concat!("remit-rpc/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Async client for the wallet HTTP API.
pub struct RpcClient {
    client: reqwest::Client,
    config: RpcConfig,
}

impl RpcClient {
    /// Create a new client with the given URL.
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig {
            url: url.to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(mut config: RpcConfig) -> Result<Self, RpcError> {
        config.url = config.url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(4)
            .build()
            .map_err(RpcError::Client)?;

        Ok(Self { client, config })
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.url, endpoint)
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// GET a JSON resource, retrying transient failures with backoff.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RpcError> {
        let attempts = self.config.retries + 1;
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                let delay = self.config.retry_delay * 2u32.saturating_pow(attempt - 1);
                tokio::time::sleep(delay).await;
            }

            match self.do_get(endpoint, query).await {
                Ok(val) => return Ok(val),
                Err(e) if e.is_transient() && attempt + 1 < attempts => {
                    log::debug!("GET {} failed (attempt {}): {}", endpoint, attempt + 1, e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn do_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RpcError> {
        let url = self.endpoint_url(endpoint);
        let resp = self
            .client
            .get(&url)
            .headers(Self::build_headers())
            .query(query)
            .send()
            .await
            .map_err(|e| RpcError::Http {
                endpoint: endpoint.to_string(),
                url: url.clone(),
                source: e,
            })?;

        Self::read_json(resp, endpoint, &url).await
    }

    /// POST a JSON body once.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, RpcError> {
        let url = self.endpoint_url(endpoint);
        let resp = self
            .client
            .post(&url)
            .headers(Self::build_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| RpcError::Http {
                endpoint: endpoint.to_string(),
                url: url.clone(),
                source: e,
            })?;

        Self::read_json(resp, endpoint, &url).await
    }

    async fn read_json<T: DeserializeOwned>(
        resp: reqwest::Response,
        endpoint: &str,
        url: &str,
    ) -> Result<T, RpcError> {
        let status = resp.status().as_u16();

        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::HttpStatus {
                endpoint: endpoint.to_string(),
                status,
                body: body.chars().take(500).collect(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| RpcError::Http {
            endpoint: endpoint.to_string(),
            url: url.to_string(),
            source: e,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RpcConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retries, 2);
        assert!(config.user_agent.starts_with("remit-rpc/"));
    }

    #[test]
    fn test_client_url_trims_slash() {
        let client = RpcClient::new("https://api.example.com/").unwrap();
        assert_eq!(client.url(), "https://api.example.com");
        assert_eq!(
            client.endpoint_url("/identities"),
            "https://api.example.com/identities"
        );
    }
}
