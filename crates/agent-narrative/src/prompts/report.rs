//! Report instruction template and the assembled prompt

use crate::error::{NarrativeError, Result};
use crate::statements::{IncomeSummary, ValuationSummary};
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version of the built-in template
pub const BUILTIN_VERSION: &str = "1";

/// Version reported for external templates without a version header
pub const UNVERSIONED: &str = "unversioned";

const BUILTIN_BODY: &str = r"Using the financial data provided below, write a comprehensive financial analysis consisting of the following {{ sections | length }} sections:
{% for section in sections %}
{{ loop.index }}. **{{ section.title }}**:
{{ section.guidance }}{% if section.word_limit %} Use no more than {{ section.word_limit }} words.{% endif %}
{% endfor %}
{%- if income_periods %}
The income statement data covers the periods {{ income_periods | join(', ') }}.
{%- endif %}
{%- if valuation_periods %}
The valuation data covers the periods {{ valuation_periods | join(', ') }}.
{%- endif %}

Please write in clear, formal English with an analytical tone. Do not speculate or generalize. Avoid generic phrases and always support your statements with exact figures provided in the data. Return plain text only (no HTML or markdown formatting).";

/// One section the report must contain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub word_limit: Option<u32>,
    pub guidance: String,
}

impl ReportSection {
    fn new(title: &str, word_limit: Option<u32>, guidance: &str) -> Self {
        Self {
            title: title.to_string(),
            word_limit,
            guidance: guidance.to_string(),
        }
    }
}

/// The five sections of the financial narrative
///
/// `period_count` is the number of income periods available; the
/// performance summary asks for exactly that span.
pub fn report_sections(period_count: usize) -> Vec<ReportSection> {
    let investment_update = format!(
        "Summarize the company's financial performance over {} using actual data (revenue \
         growth, net income, SG&A margin, operating margin). Identify notable year-over-year \
         trends, inflection points, or reversals. Use specific figures (e.g., 'Revenue rose \
         5.1% to $391B in 2024').",
        year_span(period_count)
    );

    vec![
        ReportSection::new(
            "Tagline",
            Some(25),
            "Write a concise one-sentence summary that captures the company's strategic \
             positioning or investment outlook.",
        ),
        ReportSection::new(
            "Company Overview",
            Some(250),
            "Provide a factual overview of the company's core business operations, \
             product/service portfolio, geographic reach, and competitive positioning in the \
             industry. Do not include financial performance here; keep it operational.",
        ),
        ReportSection::new("Investment Update", Some(300), &investment_update),
        ReportSection::new(
            "Valuation",
            Some(300),
            "Analyze the company's current valuation using enterprise value (EV), market \
             capitalization, stock price trends, and profitability metrics such as margin \
             trends. Include observations about valuation growth and EV/Revenue or EV/EBITDA \
             trends where the data allows, and interpret how this reflects investor sentiment. Support all \
             statements with exact numbers.",
        ),
        ReportSection::new(
            "Risks",
            None,
            "List exactly 3 bullet-point risks. Each risk must be data-driven and based on the \
             financial or operational information available. Use the format \
             '- [Short Title]: [One to two sentence explanation with relevant figures or trends]'.",
        ),
    ]
}

fn year_span(period_count: usize) -> String {
    const WORDS: [&str; 4] = ["two", "three", "four", "five"];
    match period_count {
        0 => "the reported periods".to_string(),
        1 => "the past year".to_string(),
        n @ 2..=5 => format!("the past {} years", WORDS[n - 2]),
        n => format!("the past {n} years"),
    }
}

/// Variables available to a report template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateVars {
    pub sections: Vec<ReportSection>,
    pub income_periods: Vec<String>,
    pub valuation_periods: Vec<String>,
}

impl TemplateVars {
    /// Variables for the given record sets
    pub fn for_data(income: &IncomeSummary, valuation: &ValuationSummary) -> Self {
        Self {
            sections: report_sections(income.len()),
            income_periods: income.labels().into_iter().map(str::to_string).collect(),
            valuation_periods: valuation.labels().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Versioned MiniJinja template producing the report instruction
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTemplate {
    name: String,
    version: String,
    body: String,
}

impl ReportTemplate {
    /// Create a template, validating its syntax
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let template = Self {
            name: name.into(),
            version: version.into(),
            body: body.into(),
        };

        Environment::new()
            .template_from_str(&template.body)
            .map(|_| ())
            .map_err(|e| {
                NarrativeError::TemplateError(format!("failed to parse '{}': {e}", template.name))
            })?;

        Ok(template)
    }

    /// The template shipped with the crate
    pub fn builtin() -> Self {
        Self {
            name: "financial_narrative".to_string(),
            version: BUILTIN_VERSION.to_string(),
            body: BUILTIN_BODY.to_string(),
        }
    }

    /// Parse an external template; the version comes from a leading
    /// `{# version: X #}` comment
    pub fn from_source(name: impl Into<String>, body: impl Into<String>) -> Result<Self> {
        let body = body.into();
        let version = parse_version(&body).unwrap_or_else(|| UNVERSIONED.to_string());
        Self::new(name, version, body)
    }

    /// Load an external template file
    pub async fn load(path: &Path) -> Result<Self> {
        let body = tokio::fs::read_to_string(path).await.map_err(|e| {
            NarrativeError::TemplateError(format!("failed to load {}: {e}", path.display()))
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("report")
            .to_string();
        Self::from_source(name, body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Raw template source
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Render the instruction text
    pub fn render(&self, vars: &TemplateVars) -> Result<String> {
        let rendered = Environment::new()
            .render_str(&self.body, vars)
            .map_err(|e| {
                NarrativeError::TemplateError(format!("failed to render '{}': {e}", self.name))
            })?;
        Ok(rendered.trim().to_string())
    }
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_version(body: &str) -> Option<String> {
    let rest = body.trim_start().strip_prefix("{#")?;
    let (comment, _) = rest.split_once("#}")?;
    let version = comment.trim().strip_prefix("version:")?.trim();
    (!version.is_empty()).then(|| version.to_string())
}

/// Income and valuation records handed to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPayload {
    pub financial_data: IncomeSummary,
    pub valuation_data: ValuationSummary,
}

/// Instruction plus data, ready for a downstream language model call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReportPrompt {
    pub instruction: String,
    pub template_version: String,
    pub financial_data: FinancialPayload,
}
