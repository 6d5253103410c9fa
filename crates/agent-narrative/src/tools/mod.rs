//! Financial narrative tools
//!
//! Two fetchers populate the cache from FMP; the narrative tool reads both
//! entries back and assembles the report prompt. They share one data source
//! and one cache store through [`NarrativeToolkit`].

pub mod enterprise_value;
pub mod income;
pub mod narrative;

pub use enterprise_value::EnterpriseValueTool;
pub use income::IncomeStatementTool;
pub use narrative::FinancialNarrativeTool;

use agent_core::Result as AgentResult;
use agent_tools::{Tool, ToolRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::{FinancialDataSource, FmpClient};
use crate::config::NarrativeConfig;
use crate::error::{NarrativeError, Result};
use crate::prompts::{ReportTemplate, configured_template};
use crate::store::{CacheStore, FileStore};

#[derive(Debug, Deserialize)]
struct TickerParams {
    ticker: String,
}

/// Parse `{"ticker": ...}` tool input
fn parse_ticker(params: Value) -> AgentResult<String> {
    let params: TickerParams = serde_json::from_value(params)
        .map_err(|e| agent_core::Error::InvalidParameters(e.to_string()))?;
    Ok(params.ticker)
}

/// Trim and upper-case a ticker, rejecting blank input
fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(NarrativeError::InvalidTicker);
    }
    Ok(ticker.to_uppercase())
}

fn require_source(
    source: Option<&Arc<dyn FinancialDataSource>>,
) -> Result<&Arc<dyn FinancialDataSource>> {
    source.ok_or_else(|| {
        NarrativeError::ConfigError("FMP_API_KEY environment variable not set".to_string())
    })
}

fn observation<T: Serialize>(value: &T) -> AgentResult<Value> {
    serde_json::to_value(value).map_err(|e| NarrativeError::from(e).into())
}

/// The three narrative tools wired to a shared source and store
pub struct NarrativeToolkit {
    pub income: Arc<IncomeStatementTool>,
    pub enterprise_value: Arc<EnterpriseValueTool>,
    pub narrative: Arc<FinancialNarrativeTool>,
}

impl NarrativeToolkit {
    /// Wire the tools to explicit collaborators
    ///
    /// Without a source the fetchers fail with a configuration error; the
    /// narrative tool only needs the store.
    pub fn new(
        source: Option<Arc<dyn FinancialDataSource>>,
        store: Arc<dyn CacheStore>,
        template: ReportTemplate,
        period_limit: usize,
    ) -> Self {
        Self {
            income: Arc::new(IncomeStatementTool::new(
                source.clone(),
                store.clone(),
                period_limit,
            )),
            enterprise_value: Arc::new(EnterpriseValueTool::new(
                source,
                store.clone(),
                period_limit,
            )),
            narrative: Arc::new(FinancialNarrativeTool::new(store, template)),
        }
    }

    /// Build the toolkit from configuration: FMP client (when a key is set),
    /// file store under `workspace_dir` and the configured template
    pub async fn from_config(config: &NarrativeConfig) -> Result<Self> {
        config.validate()?;

        let source: Option<Arc<dyn FinancialDataSource>> = match config.fmp_api_key {
            Some(_) => Some(Arc::new(FmpClient::from_config(config)?)),
            None => {
                tracing::warn!("FMP_API_KEY not set, fetching tools will fail");
                None
            }
        };
        let file_store = FileStore::new(&config.workspace_dir);
        tracing::debug!(root = %file_store.root().display(), "Using file cache store");
        let store: Arc<dyn CacheStore> = Arc::new(file_store);
        let template = configured_template(config).await?;

        Ok(Self::new(source, store, template, config.period_limit))
    }

    /// The tools in pipeline order: income, enterprise value, narrative
    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        vec![
            self.income.clone() as Arc<dyn Tool>,
            self.enterprise_value.clone() as Arc<dyn Tool>,
            self.narrative.clone() as Arc<dyn Tool>,
        ]
    }

    /// Register every tool into `registry`
    pub fn register_all(&self, registry: &ToolRegistry) {
        for tool in self.tools() {
            registry.register(tool);
        }
    }

    /// A fresh registry holding the three tools
    pub fn registry(&self) -> ToolRegistry {
        let registry = ToolRegistry::new();
        self.register_all(&registry);
        registry
    }
}

/// Registry of the narrative tools built from configuration
pub async fn narrative_tools(config: &NarrativeConfig) -> Result<ToolRegistry> {
    Ok(NarrativeToolkit::from_config(config).await?.registry())
}
