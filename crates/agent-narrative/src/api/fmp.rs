//! Financial Modeling Prep API client

use super::FinancialDataSource;
use crate::config::NarrativeConfig;
use crate::error::{NarrativeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Financial Modeling Prep API client
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key and base URL
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.fmp_base_url.clone(),
            api_key: api_key.to_string(),
        })
    }

    /// Create from environment variables with default settings
    pub fn from_env() -> Result<Self> {
        Self::from_config(&NarrativeConfig::from_env()?)
    }

    fn endpoint(&self, path: &str, ticker: &str) -> String {
        format!("{}/{path}/{ticker}", self.base_url)
    }

    /// GET a ticker-scoped endpoint and return the JSON payload
    async fn get(&self, path: &str, ticker: &str, limit: usize) -> Result<Value> {
        let url = self.endpoint(path, ticker);
        tracing::debug!(%url, limit, "Requesting FMP endpoint");

        // reqwest errors embed the full request URL, api key included
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string()), ("apikey", self.api_key.clone())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            return Err(NarrativeError::UpstreamStatus {
                status: response.status(),
            });
        }

        let data: Value = response.json().await.map_err(reqwest::Error::without_url)?;

        // FMP reports some failures (bad key, plan limits) in a 200 body
        if let Some(message) = data.get("Error Message").and_then(Value::as_str) {
            return Err(NarrativeError::UpstreamMessage(message.to_string()));
        }

        Ok(data)
    }
}

#[async_trait]
impl FinancialDataSource for FmpClient {
    async fn income_statements(&self, ticker: &str, limit: usize) -> Result<Value> {
        self.get("income-statement", ticker, limit).await
    }

    async fn enterprise_values(&self, ticker: &str, limit: usize) -> Result<Value> {
        self.get("enterprise-values", ticker, limit).await
    }
}
