use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Uniform success/error envelope every tool returns. Domain fields live
/// in `payload` and are flattened alongside `success`/`error` on the
/// wire, so a step's output carries the full tool response.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutcome {
    pub success: bool,

    #[serde(flatten)]
    pub payload: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutcome {
    pub fn ok(payload: Map<String, Value>) -> Self {
        Self {
            success: true,
            payload,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: Map::new(),
            error: Some(error.into()),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Capability contract for external tools. Declared failures come back as
/// `ToolOutcome { success: false, .. }`; `Err` is reserved for faults the
/// tool could not express as a result.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    async fn execute(&self, input: &Value) -> Result<ToolOutcome>;
}

/// Name-keyed tool table, built once at startup and shared read-only.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Advertised catalog: name → one-line description, sorted by name so
    /// planning prompts are stable.
    pub fn catalog(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .tools
            .values()
            .map(|tool| (tool.name().to_string(), tool.description().to_string()))
            .collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_flattens_payload_fields() {
        let mut payload = Map::new();
        payload.insert("city".to_string(), json!("Paris"));
        let value = ToolOutcome::ok(payload).to_value();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["city"], json!("Paris"));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failed_outcome_carries_error() {
        let value = ToolOutcome::fail("Rate limit exceeded").to_value();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("Rate limit exceeded"));
    }
}
