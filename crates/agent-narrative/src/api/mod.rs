//! API clients for financial data providers

pub mod fmp;

pub use fmp::FmpClient;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Source of raw financial statement payloads
///
/// Implementations return the upstream JSON as-is; shape checks and
/// normalization happen in [`crate::statements`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinancialDataSource: Send + Sync {
    /// Most recent annual income statements, newest first
    async fn income_statements(&self, ticker: &str, limit: usize) -> Result<Value>;

    /// Most recent enterprise value snapshots, newest first
    async fn enterprise_values(&self, ticker: &str, limit: usize) -> Result<Value>;
}
