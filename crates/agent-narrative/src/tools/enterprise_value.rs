//! Tool for fetching enterprise value data

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{normalize_ticker, observation, parse_ticker, require_source};
use crate::api::FinancialDataSource;
use crate::error::Result;
use crate::statements::{ValuationSummary, normalize_enterprise_values};
use crate::store::{CacheEntry, CacheStore};

/// Registered name of the enterprise value tool
pub const TOOL_NAME: &str = "fetch_ev_fmp";

/// Fetches enterprise value snapshots and caches them unmodified
pub struct EnterpriseValueTool {
    source: Option<Arc<dyn FinancialDataSource>>,
    store: Arc<dyn CacheStore>,
    period_limit: usize,
}

impl EnterpriseValueTool {
    pub fn new(
        source: Option<Arc<dyn FinancialDataSource>>,
        store: Arc<dyn CacheStore>,
        period_limit: usize,
    ) -> Self {
        Self {
            source,
            store,
            period_limit,
        }
    }

    /// Fetch and cache the enterprise value history of `ticker`
    pub async fn fetch(&self, ticker: &str) -> Result<ValuationSummary> {
        let ticker = normalize_ticker(ticker)?;
        let source = require_source(self.source.as_ref())?;

        let payload = source.enterprise_values(&ticker, self.period_limit).await?;
        let summary = normalize_enterprise_values(payload, self.period_limit)?;

        self.store
            .write(CacheEntry::EnterpriseValue, &serde_json::to_string(&summary)?)
            .await?;

        tracing::info!(
            ticker = %ticker,
            periods = summary.len(),
            "Cached enterprise value data"
        );
        Ok(summary)
    }
}

#[async_trait]
impl Tool for EnterpriseValueTool {
    async fn invoke(&self, params: Value) -> AgentResult<Value> {
        let ticker = parse_ticker(params)?;
        let summary = self.fetch(&ticker).await?;
        observation(&summary)
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fetch enterprise value and related metrics (debt, market cap, cash, etc.) from FMP \
         API for a given stock ticker."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "ticker": schema::string("The stock ticker symbol, e.g. AAPL") }),
            vec!["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFinancialDataSource;
    use crate::store::MemoryStore;

    fn tool(source: MockFinancialDataSource, store: &MemoryStore) -> EnterpriseValueTool {
        EnterpriseValueTool::new(Some(Arc::new(source)), Arc::new(store.clone()), 5)
    }

    #[test]
    fn test_tool_metadata() {
        let tool = tool(MockFinancialDataSource::new(), &MemoryStore::new());

        assert_eq!(tool.name(), "fetch_ev_fmp");
        assert!(tool.description().contains("enterprise value"));
        assert_eq!(tool.input_schema()["properties"]["ticker"]["type"], "string");
    }

    #[tokio::test]
    async fn test_fetch_passes_values_through() {
        let mut source = MockFinancialDataSource::new();
        source
            .expect_enterprise_values()
            .withf(|ticker, limit| ticker == "MSFT" && *limit == 5)
            .returning(|_, _| {
                Ok(json!([
                    {
                        "symbol": "MSFT",
                        "date": "2024-06-30",
                        "stockPrice": 446.95,
                        "numberOfShares": 7_469_000_000_u64,
                        "marketCapitalization": 3_338_269_550_000_u64,
                        "minusCashAndCashEquivalents": 18_315_000_000_u64,
                        "addTotalDebt": 97_852_000_000_u64,
                        "enterpriseValue": 3_417_806_550_000_u64
                    },
                    {"date": "2023-06-30", "stockPrice": 340.54}
                ]))
            });

        let store = MemoryStore::new();
        let output = tool(source, &store).execute(json!({"ticker": "msft"})).await;

        assert!(output.success);
        let latest = &output.observation["2024-06-30"];
        assert_eq!(latest["Stock Price"], json!(446.95));
        assert_eq!(latest["Shares"], json!(7_469_000_000_u64));
        assert_eq!(latest["Total Debt"], json!(97_852_000_000_u64));
        assert_eq!(latest["Cash"], json!(18_315_000_000_u64));
        assert_eq!(latest["Enterprise Value"], json!(3_417_806_550_000_u64));
        assert_eq!(output.observation["2023-06-30"]["Market Cap"], Value::Null);

        assert!(store.exists(CacheEntry::EnterpriseValue).await.unwrap());
        assert!(!store.exists(CacheEntry::Income).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_list_payload_keeps_existing_cache() {
        let mut source = MockFinancialDataSource::new();
        source
            .expect_enterprise_values()
            .returning(|_, _| Ok(json!({"symbol": "AAPL", "note": "premium endpoint"})));

        let store = MemoryStore::new();
        store
            .write(CacheEntry::EnterpriseValue, r#"{"2023":{}}"#)
            .await
            .unwrap();

        let output = tool(source, &store).execute(json!({"ticker": "AAPL"})).await;

        assert!(!output.success);
        assert_eq!(
            output.failure_message(),
            Some("Unexpected response format from FMP (not a list).")
        );
        assert_eq!(
            store.read(CacheEntry::EnterpriseValue).await.unwrap().as_deref(),
            Some(r#"{"2023":{}}"#)
        );
    }

    #[tokio::test]
    async fn test_missing_dates_use_positional_labels() {
        let mut source = MockFinancialDataSource::new();
        source
            .expect_enterprise_values()
            .returning(|_, _| Ok(json!([{"stockPrice": 1}, {"date": "", "stockPrice": 2}])));

        let store = MemoryStore::new();
        let summary = tool(source, &store).fetch("X").await.unwrap();

        assert_eq!(summary.labels(), vec!["Year 0", "Year 1"]);
    }

    #[tokio::test]
    async fn test_missing_ticker_parameter() {
        let output = tool(MockFinancialDataSource::new(), &MemoryStore::new())
            .execute(json!({}))
            .await;

        assert!(!output.success);
        assert!(output.failure_message().unwrap().starts_with("Invalid parameters"));
    }
}
