//! Tool trait definition

use crate::ToolDefinition;
use agent_core::{Result, ToolOutput};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that an orchestration layer can invoke
///
/// Each tool provides a name, description, and JSON schema for its input.
/// Implementors write [`Tool::invoke`]; callers use [`Tool::execute`], which
/// never fails and folds every error into a failed [`ToolOutput`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// The observation to report on success
    async fn invoke(&self, params: Value) -> Result<Value>;

    /// Run the tool and convert the outcome into a [`ToolOutput`]
    async fn execute(&self, params: Value) -> ToolOutput {
        match self.invoke(params).await {
            Ok(observation) => ToolOutput::success(observation),
            Err(err) => {
                tracing::warn!(tool = self.name(), error = %err, "Tool invocation failed");
                ToolOutput::failure(err.to_string())
            }
        }
    }

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the caller decide when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use agent_tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({ "ticker": schema::string("The stock ticker symbol") }),
    ///     vec!["ticker"],
    /// );
    /// assert_eq!(schema["required"][0], "ticker");
    /// ```
    fn input_schema(&self) -> Value;

    /// Describe the tool for an orchestration layer
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Error;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        async fn invoke(&self, params: Value) -> Result<Value> {
            match params.get("text") {
                Some(text) => Ok(text.clone()),
                None => Err(Error::InvalidParameters("missing field `text`".to_string())),
            }
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input text"
        }

        fn input_schema(&self) -> Value {
            crate::schema::object(json!({ "text": crate::schema::string("Text") }), vec!["text"])
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let output = EchoTool.execute(json!({"text": "hi"})).await;
        assert!(output.success);
        assert_eq!(output.observation, json!("hi"));
    }

    #[tokio::test]
    async fn test_execute_converts_error() {
        let output = EchoTool.execute(json!({})).await;
        assert!(!output.success);
        assert_eq!(
            output.failure_message(),
            Some("Invalid parameters: missing field `text`")
        );
    }

    #[test]
    fn test_definition() {
        let definition = EchoTool.definition();
        assert_eq!(definition.name, "echo");
        assert_eq!(definition.input_schema["required"], json!(["text"]));
    }
}
