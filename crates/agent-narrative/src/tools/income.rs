//! Tool for fetching income statements

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

use super::{normalize_ticker, observation, parse_ticker, require_source};
use crate::api::FinancialDataSource;
use crate::error::Result;
use crate::statements::{IncomeSummary, normalize_income};
use crate::store::{CacheEntry, CacheStore};

/// Registered name of the income statement tool
pub const TOOL_NAME: &str = "fetch_income_statement_fmp";

/// Fetches income statements, derives margins and caches the result
pub struct IncomeStatementTool {
    source: Option<Arc<dyn FinancialDataSource>>,
    store: Arc<dyn CacheStore>,
    period_limit: usize,
}

impl IncomeStatementTool {
    /// Create a new income statement tool
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

    /// Fetch, normalize and cache the income statements of `ticker`
    ///
    /// Nothing is written unless every entry normalized successfully.
    pub async fn fetch(&self, ticker: &str) -> Result<IncomeSummary> {
        let ticker = normalize_ticker(ticker)?;
        let source = require_source(self.source.as_ref())?;

        let payload = source.income_statements(&ticker, self.period_limit).await?;
        let summary = normalize_income(payload, self.period_limit)?;

        self.store
            .write(CacheEntry::Income, &serde_json::to_string(&summary)?)
            .await?;

        tracing::info!(
            ticker = %ticker,
            periods = summary.len(),
            "Cached income statement data"
        );
        Ok(summary)
    }
}

#[async_trait]
impl Tool for IncomeStatementTool {
    async fn invoke(&self, params: Value) -> AgentResult<Value> {
        let ticker = parse_ticker(params)?;
        let summary = self.fetch(&ticker).await?;
        observation(&summary)
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fetches and computes the last 5 years of income statement data (revenue, SG&A, \
         net income, operating income, margins, etc.) from FMP API."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "ticker": schema::string("The stock ticker symbol, e.g. AAPL") }),
            vec!["ticker"],
        )
    }
}
