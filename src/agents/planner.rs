use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::llm::ModelGateway;
use crate::models::Plan;
use crate::prompt::builder::build_planner_prompt;
use crate::tools::ToolRegistry;

const SESSION_ID: &str = "planner";

/// Turns a task string into a Plan. Sees only tool names and
/// descriptions, never the implementations.
pub struct Planner {
    gateway: ModelGateway,
    registry: Arc<ToolRegistry>,
}

impl Planner {
    pub fn new(gateway: ModelGateway, registry: Arc<ToolRegistry>) -> Self {
        Self { gateway, registry }
    }

    /// Requests a structured plan from the model. A transport fault
    /// propagates; any unusable document (sentinel, missing or empty
    /// steps, malformed structure) degrades to the one-step fallback
    /// plan, so the Executor always receives at least one step.
    pub async fn create_plan(&self, user_task: &str) -> Result<Plan> {
        let prompt = build_planner_prompt(user_task, &self.registry.catalog());
        let doc = self.gateway.generate_structured(&prompt, SESSION_ID).await?;

        let parsed = if doc.get("steps").is_some() {
            serde_json::from_value::<Plan>(doc.clone()).ok()
        } else {
            None
        };

        match parsed {
            Some(plan) if !plan.steps.is_empty() => {
                info!(steps = plan.steps.len(), "plan created");
                Ok(plan)
            }
            _ => {
                let diagnostic = doc
                    .get("error")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Plan generation incomplete")
                    .to_string();
                warn!(%diagnostic, "model plan unusable, using fallback");
                Ok(Plan::fallback(user_task, diagnostic))
            }
        }
    }
}
