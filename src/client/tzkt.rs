//! TzKT indexer client

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use super::{Baker, BakerListParams, BakerReward, Cycle, IndexerApi, NetworkStats};
use crate::error::{ApiError, Result};

/// Public TzKT API base URL
pub const DEFAULT_API_URL: &str = "https://api.tzkt.io/v1";

/// TzKT allows 10 requests per second on the free tier
const RATE_LIMIT_PER_SECOND: u32 = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a TzKT-compatible indexer
pub struct TzktClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TzktClient {
    /// Create a client against the public indexer
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client against a custom indexer (trailing slashes are ignored)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("tezbake/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with query parameters and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                endpoint: path.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
        })?;
        Ok(data)
    }
}

#[async_trait]
impl IndexerApi for TzktClient {
    async fn network_stats(&self) -> Result<NetworkStats> {
        self.get("/statistics/current", &[]).await
    }

    async fn current_cycle(&self) -> Result<Cycle> {
        let query = [
            ("sort.desc".to_string(), "index".to_string()),
            ("limit".to_string(), "1".to_string()),
        ];
        let cycles: Vec<Cycle> = self.get("/cycles", &query).await?;
        cycles
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NoCurrentCycle.into())
    }

    async fn bakers(&self, params: &BakerListParams) -> Result<Vec<Baker>> {
        self.get("/delegates", &params.to_query()).await
    }

    async fn baker_details(&self, address: &str) -> Result<Baker> {
        let path = format!("/delegates/{}", address);
        self.get(&path, &[]).await
    }

    async fn baker_rewards(&self, address: &str, limit: u32) -> Result<Vec<BakerReward>> {
        let path = format!("/rewards/bakers/{}", address);
        let query = [
            ("limit".to_string(), limit.to_string()),
            ("sort.desc".to_string(), "cycle".to_string()),
        ];
        self.get(&path, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TzktClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TzktClient::with_base_url("http://localhost:8080/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }
}
