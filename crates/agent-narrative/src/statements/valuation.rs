//! Enterprise value records, passed through from upstream

use super::period::{PeriodMap, period_label};
use super::{expect_list, malformed_entry};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Enterprise value entry as returned by FMP
///
/// FMP reports debt and cash as the EV bridge terms `addTotalDebt` and
/// `minusCashAndCashEquivalents`; the plain names are accepted as well.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseValueEntry {
    pub date: Option<String>,
    pub stock_price: Option<Number>,
    pub number_of_shares: Option<Number>,
    pub market_capitalization: Option<Number>,
    pub total_debt: Option<Number>,
    pub add_total_debt: Option<Number>,
    pub cash_and_cash_equivalents: Option<Number>,
    pub minus_cash_and_cash_equivalents: Option<Number>,
    pub enterprise_value: Option<Number>,
}

/// One period of enterprise value inputs, no derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyValuationRecord {
    #[serde(rename = "Stock Price")]
    pub stock_price: Option<Number>,
    #[serde(rename = "Shares")]
    pub shares: Option<Number>,
    #[serde(rename = "Market Cap")]
    pub market_cap: Option<Number>,
    #[serde(rename = "Total Debt")]
    pub total_debt: Option<Number>,
    #[serde(rename = "Cash")]
    pub cash: Option<Number>,
    #[serde(rename = "Enterprise Value")]
    pub enterprise_value: Option<Number>,
}

impl From<EnterpriseValueEntry> for YearlyValuationRecord {
    fn from(entry: EnterpriseValueEntry) -> Self {
        Self {
            stock_price: entry.stock_price,
            shares: entry.number_of_shares,
            market_cap: entry.market_capitalization,
            total_debt: entry.total_debt.or(entry.add_total_debt),
            cash: entry
                .cash_and_cash_equivalents
                .or(entry.minus_cash_and_cash_equivalents),
            enterprise_value: entry.enterprise_value,
        }
    }
}

/// Valuation records keyed by period
pub type ValuationSummary = PeriodMap<YearlyValuationRecord>;

/// Normalize an enterprise-value payload into at most `limit` records
pub fn normalize_enterprise_values(payload: Value, limit: usize) -> Result<ValuationSummary> {
    let mut summary = ValuationSummary::new();

    for (index, raw) in expect_list(payload)?.into_iter().take(limit).enumerate() {
        let entry: EnterpriseValueEntry = serde_json::from_value(raw)
            .map_err(|e| malformed_entry("enterprise value", index, &e))?;
        let label = period_label(entry.date.clone(), index);
        summary.insert(label, entry.into());
    }

    Ok(summary)
}
