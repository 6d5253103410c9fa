//! Tool assembling the financial narrative prompt from cached data

use agent_core::Result as AgentResult;
use agent_tools::{Tool, schema};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::observation;
use crate::error::{NarrativeError, Result};
use crate::prompts::{FinancialPayload, FinancialReportPrompt, ReportTemplate, TemplateVars};
use crate::statements::{IncomeSummary, ValuationSummary};
use crate::store::{CacheEntry, CacheStore};

/// Registered name of the narrative tool
pub const TOOL_NAME: &str = "generate_financial_narrative";

const PREREQUISITES: [CacheEntry; 2] = [CacheEntry::Income, CacheEntry::EnterpriseValue];

/// Builds the report prompt from the two cache entries; never writes
pub struct FinancialNarrativeTool {
    store: Arc<dyn CacheStore>,
    template: ReportTemplate,
}

impl FinancialNarrativeTool {
    /// Create a narrative tool rendering `template`
    pub fn new(store: Arc<dyn CacheStore>, template: ReportTemplate) -> Self {
        Self { store, template }
    }

    pub fn template(&self) -> &ReportTemplate {
        &self.template
    }

    /// Assemble the prompt
    ///
    /// Both entries are checked before either is read, so a missing
    /// prerequisite fails without touching the other.
    pub async fn assemble(&self) -> Result<FinancialReportPrompt> {
        let mut missing = Vec::new();
        for entry in PREREQUISITES {
            if !self.store.exists(entry).await? {
                missing.push(entry);
            }
        }
        if !missing.is_empty() {
            return Err(NarrativeError::MissingPrerequisites(missing));
        }

        let income: IncomeSummary = self.read_entry(CacheEntry::Income).await?;
        let valuation: ValuationSummary = self.read_entry(CacheEntry::EnterpriseValue).await?;

        let instruction = self
            .template
            .render(&TemplateVars::for_data(&income, &valuation))?;

        tracing::info!(
            income_periods = income.len(),
            valuation_periods = valuation.len(),
            template_version = self.template.version(),
            "Assembled financial narrative prompt"
        );

        Ok(FinancialReportPrompt {
            instruction,
            template_version: self.template.version().to_string(),
            financial_data: FinancialPayload {
                financial_data: income,
                valuation_data: valuation,
            },
        })
    }

    async fn read_entry<T: DeserializeOwned>(&self, entry: CacheEntry) -> Result<T> {
        // Removed between the existence check and the read
        let contents = self
            .store
            .read(entry)
            .await?
            .ok_or_else(|| NarrativeError::MissingPrerequisites(vec![entry]))?;

        serde_json::from_str(&contents).map_err(|source| NarrativeError::MalformedCache {
            entry,
            source,
        })
    }
}

#[async_trait]
impl Tool for FinancialNarrativeTool {
    async fn invoke(&self, _params: Value) -> AgentResult<Value> {
        let prompt = self.assemble().await?;
        observation(&prompt)
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Generates a 5-paragraph financial report using locally cached data. No input required."
    }

    fn input_schema(&self) -> Value {
        schema::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, MockCacheStore};
    use mockall::predicate::eq;
    use serde_json::json;

    const INCOME: &str = r#"{"2024":{"Revenue":1000,"Operating Expenses":"N/A","R&D":"N/A","SG&A":100,"Operating Income":200,"Net Income":150,"SG&A Margin":0.1,"Operating Margin":0.2,"Net Margin":0.15},"2023":{"Revenue":0,"Operating Expenses":300,"R&D":"N/A","SG&A":50,"Operating Income":0,"Net Income":0,"SG&A Margin":null,"Operating Margin":null,"Net Margin":null}}"#;
    const VALUATION: &str = r#"{"2024":{"Stock Price":10.5,"Shares":100,"Market Cap":1050,"Total Debt":null,"Cash":null,"Enterprise Value":1200}}"#;

    async fn populated_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.write(CacheEntry::Income, INCOME).await.unwrap();
        store.write(CacheEntry::EnterpriseValue, VALUATION).await.unwrap();
        store
    }

    #[test]
    fn test_tool_metadata() {
        let tool = FinancialNarrativeTool::new(Arc::new(MemoryStore::new()), ReportTemplate::builtin());

        assert_eq!(tool.name(), "generate_financial_narrative");
        assert!(tool.description().ends_with("No input required."));
        assert_eq!(tool.input_schema()["properties"], json!({}));
    }

    #[tokio::test]
    async fn test_assemble_prompt() {
        let store = populated_store().await;
        let tool = FinancialNarrativeTool::new(Arc::new(store.clone()), ReportTemplate::builtin());

        let prompt = tool.assemble().await.unwrap();

        assert_eq!(prompt.template_version, "1");
        assert!(prompt.instruction.contains("5. **Risks**"));
        assert!(prompt.instruction.contains("covers the periods 2024, 2023."));
        assert_eq!(prompt.financial_data.financial_data.labels(), vec!["2024", "2023"]);
        assert_eq!(
            prompt.financial_data.financial_data.get("2023").unwrap().net_margin,
            None
        );

        let observation = tool.execute(json!({"ignored": true})).await;
        assert!(observation.success);
        assert_eq!(
            observation.observation["financial_data"]["valuation_data"]["2024"]["Market Cap"],
            json!(1050)
        );
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_cached_data_round_trips_unchanged() {
        let store = populated_store().await;
        let tool = FinancialNarrativeTool::new(Arc::new(store), ReportTemplate::builtin());

        let prompt = tool.assemble().await.unwrap();

        let income = serde_json::to_string(&prompt.financial_data.financial_data).unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&income).unwrap(),
            serde_json::from_str::<Value>(INCOME).unwrap()
        );
        assert_eq!(income.find("\"2024\""), Some(1));
    }

    #[tokio::test]
    async fn test_missing_entry_reads_nothing() {
        let mut store = MockCacheStore::new();
        store
            .expect_exists()
            .with(eq(CacheEntry::Income))
            .times(1)
            .returning(|_| Ok(true));
        store
            .expect_exists()
            .with(eq(CacheEntry::EnterpriseValue))
            .times(1)
            .returning(|_| Ok(false));
        store.expect_read().never();
        store.expect_write().never();

        let tool = FinancialNarrativeTool::new(Arc::new(store), ReportTemplate::builtin());
        let output = tool.execute(json!({})).await;

        assert!(!output.success);
        assert_eq!(
            output.failure_message(),
            Some("Required data files not found: ev_data.json. Make sure to run fetch_ev_fmp first.")
        );
    }

    #[tokio::test]
    async fn test_both_entries_missing() {
        let tool = FinancialNarrativeTool::new(Arc::new(MemoryStore::new()), ReportTemplate::builtin());

        match tool.assemble().await {
            Err(NarrativeError::MissingPrerequisites(entries)) => {
                assert_eq!(entries, vec![CacheEntry::Income, CacheEntry::EnterpriseValue]);
            }
            other => panic!("Expected MissingPrerequisites, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_cache() {
        let store = MemoryStore::new();
        store.write(CacheEntry::Income, "{not json").await.unwrap();
        store.write(CacheEntry::EnterpriseValue, VALUATION).await.unwrap();

        let tool = FinancialNarrativeTool::new(Arc::new(store), ReportTemplate::builtin());

        assert!(matches!(
            tool.assemble().await,
            Err(NarrativeError::MalformedCache {
                entry: CacheEntry::Income,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_custom_template() {
        let template =
            ReportTemplate::from_source("short", "{# version: 2 #}Write {{ sections | length }} paragraphs.")
                .unwrap();
        let tool = FinancialNarrativeTool::new(Arc::new(populated_store().await), template);

        let prompt = tool.assemble().await.unwrap();
        assert_eq!(prompt.instruction, "Write 5 paragraphs.");
        assert_eq!(prompt.template_version, "2");
        assert_eq!(tool.template().name(), "short");
    }
}
