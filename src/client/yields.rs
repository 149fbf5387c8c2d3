//! Yield enrichment client

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;

use super::{YieldApi, YieldRates};
use crate::error::{ApiError, Result};

/// Fetches current APY figures from a JSON endpoint.
///
/// A client without an endpoint fails every call, which callers treat like
/// an unreachable source.
pub struct YieldClient {
    http: HttpClient,
    url: Option<String>,
}

impl YieldClient {
    pub fn new(url: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http, url })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

#[async_trait]
impl YieldApi for YieldClient {
    async fn yield_rates(&self) -> Result<YieldRates> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| ApiError::Network("No yield source configured".to_string()))?;

        debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                endpoint: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let rates: YieldRates = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse yields: {}", e)))?;

        if !rates.is_plausible() {
            return Err(
                ApiError::InvalidResponse(format!("Implausible yields: {:?}", rates)).into(),
            );
        }
        Ok(rates)
    }
}
