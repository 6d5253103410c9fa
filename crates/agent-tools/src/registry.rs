//! Tool registry for managing available tools

use crate::{Tool, ToolDefinition};
use agent_core::ToolOutput;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Registry for managing tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    // Every write is a single insert, so a poisoned map is still consistent
    fn read_tools(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Tool>>> {
        self.tools.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Tool registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_tools(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn Tool>>> {
        self.tools.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Tool registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Register a tool
    ///
    /// A tool registered under an existing name replaces the previous one.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        self.write_tools().insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.read_tools().get(name).cloned()
    }

    /// List all registered tools
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.read_tools().values().cloned().collect()
    }

    /// Definitions of all registered tools, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<_> = self.list_tools().iter().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Execute a tool by name
    ///
    /// Unknown names yield a failed output rather than an error.
    pub async fn execute(&self, name: &str, params: Value) -> ToolOutput {
        match self.get(name) {
            Some(tool) => tool.execute(params).await,
            None => ToolOutput::failure(agent_core::Error::UnknownTool(name.to_string()).to_string()),
        }
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.read_tools().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
