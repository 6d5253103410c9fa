//! Financial narrative toolkit
//!
//! This crate turns a stock ticker into a structured prompt asking a language
//! model for a five-section financial report. It includes:
//!
//! - Income statement fetching from Financial Modeling Prep with derived
//!   SG&A, operating and net margins
//! - Enterprise value fetching (price, shares, market cap, debt, cash)
//! - A cache of normalized data shared between tools
//! - Prompt assembly from a versioned MiniJinja template
//!
//! # Architecture
//!
//! Three tools implement [`agent_tools::Tool`]:
//! - `fetch_income_statement_fmp`: writes the income cache entry
//! - `fetch_ev_fmp`: writes the enterprise value cache entry
//! - `generate_financial_narrative`: reads both entries and returns the prompt
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_narrative::{NarrativeConfig, narrative_tools};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = NarrativeConfig::from_env()?;
//!     let registry = narrative_tools(&config).await?;
//!
//!     registry.execute("fetch_income_statement_fmp", json!({"ticker": "AAPL"})).await;
//!     registry.execute("fetch_ev_fmp", json!({"ticker": "AAPL"})).await;
//!     let report = registry.execute("generate_financial_narrative", json!({})).await;
//!     println!("{}", report.observation);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod prompts;
pub mod statements;
pub mod store;
pub mod tools;

// Re-export main types for convenience
pub use api::{FinancialDataSource, FmpClient};
pub use config::{DEFAULT_FMP_BASE_URL, MAX_PERIODS, NarrativeConfig, NarrativeConfigBuilder};
pub use error::{NarrativeError, Result};
pub use prompts::{FinancialPayload, FinancialReportPrompt, ReportTemplate};
pub use statements::{IncomeSummary, ValuationSummary, YearlyIncomeRecord, YearlyValuationRecord};
pub use store::{CacheEntry, CacheStore, FileStore, MemoryStore};
pub use tools::{
    EnterpriseValueTool, FinancialNarrativeTool, IncomeStatementTool, NarrativeToolkit,
    narrative_tools,
};
