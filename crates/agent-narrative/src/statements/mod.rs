//! Normalized financial statements
//!
//! Converts raw FMP payloads into period-keyed record sets:
//! - `income`: income statement line items plus derived margins
//! - `valuation`: enterprise value inputs, passed through unmodified

pub mod income;
pub mod period;
pub mod valuation;

pub use income::{
    IncomeStatementEntry, IncomeSummary, NOT_AVAILABLE, Reported, YearlyIncomeRecord, margin,
    normalize_income,
};
pub use period::{PeriodMap, period_label};
pub use valuation::{
    EnterpriseValueEntry, ValuationSummary, YearlyValuationRecord, normalize_enterprise_values,
};

use crate::error::{NarrativeError, Result};
use serde_json::Value;

/// Require the payload to be a JSON array
fn expect_list(payload: Value) -> Result<Vec<Value>> {
    match payload {
        Value::Array(items) => Ok(items),
        _ => Err(NarrativeError::UnexpectedShape("not a list".to_string())),
    }
}

fn malformed_entry(kind: &str, index: usize, err: &serde_json::Error) -> NarrativeError {
    NarrativeError::UnexpectedShape(format!("{kind} entry {index} is malformed: {err}"))
}
