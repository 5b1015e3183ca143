use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::llm::ModelGateway;
use crate::models::{ExecutionReport, OverallStatus, Plan, StepResult, StepSpec, StepStatus};
use crate::prompt::builder::build_reasoning_prompt;
use crate::tools::ToolRegistry;

/// Walks a Plan's steps, dispatching each to a tool or to the model,
/// threading prior results forward as context.
pub struct Executor {
    gateway: ModelGateway,
    registry: Arc<ToolRegistry>,
}

impl Executor {
    pub fn new(gateway: ModelGateway, registry: Arc<ToolRegistry>) -> Self {
        Self { gateway, registry }
    }

    /// Per-step state machine. Declared tool failures become `failed`,
    /// an unknown tool name fails fast without any invocation, and
    /// infrastructure faults (model or tool) downgrade to `error`.
    /// The returned result is always terminal.
    pub async fn execute_step(
        &self,
        step: &StepSpec,
        context: &BTreeMap<u32, StepResult>,
    ) -> StepResult {
        let result = StepResult::pending(step);

        match &step.tool {
            Some(name) => match self.registry.get(name) {
                Some(tool) => {
                    debug!(step = step.step_number, tool = %name, "invoking tool");
                    let input = step.tool_input.clone().unwrap_or(Value::Null);
                    match tool.execute(&input).await {
                        Ok(outcome) if outcome.success => result.succeed(outcome.to_value()),
                        Ok(outcome) => {
                            let message = outcome
                                .error
                                .clone()
                                .unwrap_or_else(|| "Tool execution failed".to_string());
                            warn!(step = step.step_number, tool = %name, %message, "tool failed");
                            result.fail(message, Some(outcome.to_value()))
                        }
                        Err(e) => result.fault(e.to_string()),
                    }
                }
                None => result.fail(format!("Unknown tool: {name}"), None),
            },
            None => {
                let prompt = build_reasoning_prompt(&step.action, context);
                let session_id = format!("executor_{}", step.step_number);
                match self.gateway.generate(&prompt, &session_id).await {
                    Ok(text) => result.succeed(json!({ "reasoning": text })),
                    Err(e) => result.fault(e.to_string()),
                }
            }
        }
    }

    /// Runs every step sequentially in declared list order; `step_number`
    /// keys the context but never re-sorts execution. No early abort: a
    /// failed step still lets independent later steps run, and any
    /// non-success step makes the report `partial`.
    pub async fn execute_plan(&self, plan: &Plan) -> Result<ExecutionReport> {
        info!(steps = plan.steps.len(), "executing plan");

        let mut steps = Vec::with_capacity(plan.steps.len());
        let mut context: BTreeMap<u32, StepResult> = BTreeMap::new();
        let mut all_success = true;

        for step in &plan.steps {
            let step_result = self.execute_step(step, &context).await;
            if step_result.status != StepStatus::Success {
                all_success = false;
            }
            context.insert(step.step_number, step_result.clone());
            steps.push(step_result);
        }

        Ok(ExecutionReport {
            task_summary: plan.task_summary.clone(),
            final_output_format: plan.final_output_format.clone(),
            steps,
            overall_status: if all_success {
                OverallStatus::Success
            } else {
                OverallStatus::Partial
            },
        })
    }
}
