//! Income statement normalization and margin derivation

use super::period::{PeriodMap, period_label};
use super::{expect_list, malformed_entry};
use crate::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Marker written for descriptive line items the upstream did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Income statement entry as returned by FMP
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementEntry {
    pub date: Option<String>,
    pub revenue: Option<Number>,
    pub operating_expenses: Option<Number>,
    pub research_and_development_expenses: Option<Number>,
    pub selling_general_and_administrative_expenses: Option<Number>,
    pub operating_income: Option<Number>,
    pub net_income: Option<Number>,
}

/// A line item that is either reported or explicitly not available
#[derive(Debug, Clone, PartialEq)]
pub enum Reported {
    /// Value reported upstream
    Amount(Number),
    /// Value absent upstream
    NotAvailable,
}

impl From<Option<Number>> for Reported {
    fn from(value: Option<Number>) -> Self {
        value.map_or(Self::NotAvailable, Self::Amount)
    }
}

impl Serialize for Reported {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Amount(n) => n.serialize(serializer),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Reported {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(Self::Amount(n)),
            Value::Null => Ok(Self::NotAvailable),
            Value::String(s) if s == NOT_AVAILABLE => Ok(Self::NotAvailable),
            other => Err(D::Error::custom(format!(
                "expected a number or \"{NOT_AVAILABLE}\", got {other}"
            ))),
        }
    }
}

/// One fiscal year of income data with derived margins
///
/// Revenue, SG&A, operating income and net income default to 0 when absent.
/// A margin is `None` whenever revenue is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyIncomeRecord {
    #[serde(rename = "Revenue")]
    pub revenue: Number,
    #[serde(rename = "Operating Expenses")]
    pub operating_expenses: Reported,
    #[serde(rename = "R&D")]
    pub research_and_development: Reported,
    #[serde(rename = "SG&A")]
    pub sga: Number,
    #[serde(rename = "Operating Income")]
    pub operating_income: Number,
    #[serde(rename = "Net Income")]
    pub net_income: Number,
    #[serde(rename = "SG&A Margin")]
    pub sga_margin: Option<f64>,
    #[serde(rename = "Operating Margin")]
    pub operating_margin: Option<f64>,
    #[serde(rename = "Net Margin")]
    pub net_margin: Option<f64>,
}

impl YearlyIncomeRecord {
    /// Normalize one upstream entry
    pub fn from_entry(entry: IncomeStatementEntry) -> Self {
        let revenue = entry.revenue.unwrap_or_else(zero);
        let sga = entry
            .selling_general_and_administrative_expenses
            .unwrap_or_else(zero);
        let operating_income = entry.operating_income.unwrap_or_else(zero);
        let net_income = entry.net_income.unwrap_or_else(zero);

        let r = as_f64(&revenue);

        Self {
            sga_margin: margin(as_f64(&sga), r),
            operating_margin: margin(as_f64(&operating_income), r),
            net_margin: margin(as_f64(&net_income), r),
            revenue,
            operating_expenses: entry.operating_expenses.into(),
            research_and_development: entry.research_and_development_expenses.into(),
            sga,
            operating_income,
            net_income,
        }
    }
}

/// Income records keyed by fiscal period
pub type IncomeSummary = PeriodMap<YearlyIncomeRecord>;

/// Normalize an income-statement payload into at most `limit` records
pub fn normalize_income(payload: Value, limit: usize) -> Result<IncomeSummary> {
    let mut summary = IncomeSummary::new();

    for (index, raw) in expect_list(payload)?.into_iter().take(limit).enumerate() {
        let entry: IncomeStatementEntry = serde_json::from_value(raw)
            .map_err(|e| malformed_entry("income statement", index, &e))?;
        let label = period_label(entry.date.clone(), index);
        summary.insert(label, YearlyIncomeRecord::from_entry(entry));
    }

    Ok(summary)
}

/// `numerator / revenue` rounded to 4 decimal places, `None` when revenue is zero
///
/// Ties round half away from zero: 0.03125 becomes 0.0313.
#[allow(clippy::float_cmp)]
pub fn margin(numerator: f64, revenue: f64) -> Option<f64> {
    if revenue == 0.0 {
        return None;
    }
    Some(round_to_4(numerator / revenue))
}

fn round_to_4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn zero() -> Number {
    Number::from(0)
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(0.0)
}
