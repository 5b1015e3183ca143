use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Execution plan produced by the Planner. Field names match the JSON the
/// planning prompt requests, so a well-formed model response deserializes
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub task_summary: String,

    pub steps: Vec<StepSpec>,

    #[serde(default)]
    pub final_output_format: String,

    /// Diagnostic recorded when the model's plan was discarded and the
    /// fallback plan synthesized in its place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Plan {
    /// Minimal one-step reasoning plan, used when the model returned no
    /// usable steps. Keeps the downstream invariant that every plan has
    /// at least one step.
    pub fn fallback(user_task: &str, diagnostic: String) -> Self {
        Self {
            task_summary: user_task.to_string(),
            steps: vec![StepSpec {
                step_number: 1,
                action: "Process the request".to_string(),
                tool: None,
                tool_input: None,
                expected_output: Some("Response to user".to_string()),
            }],
            final_output_format: "Text response".to_string(),
            error: Some(diagnostic),
        }
    }
}

/// One unit of work: a tool invocation when `tool` is set, otherwise a
/// pure reasoning step. Lenient defaults on every field; malformed steps
/// degrade at execution time rather than failing the whole plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    #[serde(default)]
    pub step_number: u32,

    #[serde(default = "default_action")]
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
}

fn default_action() -> String {
    "Unknown action".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fallback_plan_has_one_reasoning_step() {
        let plan = Plan::fallback("do something", "Plan generation incomplete".to_string());
        assert_eq!(plan.steps.len(), 1);
        assert!(plan.steps[0].tool.is_none());
        assert_eq!(plan.final_output_format, "Text response");
        assert!(plan.error.is_some());
    }

    #[test]
    fn step_spec_tolerates_missing_fields() {
        let step: StepSpec = serde_json::from_value(json!({"step_number": 2})).unwrap();
        assert_eq!(step.step_number, 2);
        assert_eq!(step.action, "Unknown action");
        assert!(step.tool.is_none());
    }
}
