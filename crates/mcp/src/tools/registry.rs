// Tool trait and the name -> handler dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::protocol::{CallToolResult, ToolSchema};

/// A named operation invocable by a client.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Schema advertised via `tools/list`.
    fn schema(&self) -> ToolSchema;

    /// Execute with the raw JSON arguments from `tools/call`.
    ///
    /// Domain failures come back as an error *result*, not an `Err`;
    /// `Err` is reserved for faults in the adapter itself.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Fixed dispatch table, populated once at startup.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    // Stable listing order, registration order.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool; duplicate names are a wiring bug and are
    /// rejected here rather than at call time.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.schema().name;
        if self.tools.contains_key(&name) {
            bail!("tool already registered: {name}");
        }
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.schema())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Input-schema helpers

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str, allowed: &[&str]) -> serde_json::Value {
    if allowed.is_empty() {
        serde_json::json!({ "type": "string", "description": description })
    } else {
        serde_json::json!({ "type": "string", "description": description, "enum": allowed })
    }
}

pub fn json_schema_integer(description: &str, minimum: i64, maximum: i64) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "description": description,
        "minimum": minimum,
        "maximum": maximum
    })
}
