//! Financial narrative prompt templates
//!
//! The report instruction is a versioned MiniJinja template rendered against
//! the report sections and the periods present in the cached data. The
//! built-in template can be replaced by a file supplied through
//! configuration.

mod report;

pub use report::{
    BUILTIN_VERSION, FinancialPayload, FinancialReportPrompt, ReportSection, ReportTemplate,
    TemplateVars, UNVERSIONED, report_sections,
};

use crate::config::NarrativeConfig;
use crate::error::Result;

/// Template selected by configuration: the external file when set,
/// otherwise the built-in template
pub async fn configured_template(config: &NarrativeConfig) -> Result<ReportTemplate> {
    match &config.template_path {
        Some(path) => {
            let template = ReportTemplate::load(path).await?;
            tracing::info!(
                name = template.name(),
                version = template.version(),
                "Loaded report template"
            );
            Ok(template)
        }
        None => Ok(ReportTemplate::builtin()),
    }
}
