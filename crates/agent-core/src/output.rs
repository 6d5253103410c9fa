//! Uniform result shape returned by every tool invocation
//!
//! A tool never lets an error escape to the orchestration layer. Instead it
//! reports a [`ToolOutput`] that carries a success flag and a human- or
//! machine-readable observation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Payload on success, description of the problem on failure
    pub observation: Value,
    /// Whether the tool completed its work
    pub success: bool,
}

impl ToolOutput {
    /// Successful output carrying the given observation
    pub fn success(observation: impl Into<Value>) -> Self {
        Self {
            observation: observation.into(),
            success: true,
        }
    }

    /// Failed output carrying a descriptive message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            observation: Value::String(message.into()),
            success: false,
        }
    }

    /// Failure message, if this output is a failure with a textual observation
    pub fn failure_message(&self) -> Option<&str> {
        if self.success {
            None
        } else {
            self.observation.as_str()
        }
    }
}

impl From<crate::Result<Value>> for ToolOutput {
    fn from(result: crate::Result<Value>) -> Self {
        match result {
            Ok(observation) => Self::success(observation),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
