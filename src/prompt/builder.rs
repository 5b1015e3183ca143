use std::collections::BTreeMap;

use crate::models::StepResult;

pub const PLANNER_SYSTEM_MESSAGE: &str = r#"You are a Planner Agent for an AI Operations Assistant.
Your job is to analyze user requests and create structured execution plans.
You have access to specific tools and must select the appropriate ones.

Always respond with a valid JSON execution plan."#;

pub const EXECUTOR_SYSTEM_MESSAGE: &str = r#"You are an Executor Agent for an AI Operations Assistant.
Your job is to execute individual steps of a plan and process tool outputs.
When a step requires reasoning without a tool, provide helpful analysis."#;

pub const VERIFIER_SYSTEM_MESSAGE: &str = r#"You are a Verifier Agent for an AI Operations Assistant.
Your job is to:
1. Validate execution results for completeness and accuracy
2. Identify any missing or incorrect information
3. Synthesize results into a clear, structured final response
4. Suggest corrections if needed

Always provide helpful, accurate, and well-formatted responses."#;

pub fn build_planner_prompt(user_task: &str, catalog: &[(String, String)]) -> String {
    let tools_info = catalog
        .iter()
        .map(|(name, desc)| format!("- {name}: {desc}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze this user task and create an execution plan.

USER TASK: {user_task}

AVAILABLE TOOLS:
{tools_info}

Create a JSON plan with this exact structure:
{{
    "task_summary": "Brief summary of what user wants",
    "steps": [
        {{
            "step_number": 1,
            "action": "Description of the action",
            "tool": "tool_name or null if no tool needed",
            "tool_input": "input for the tool or null",
            "expected_output": "what this step should produce"
        }}
    ],
    "final_output_format": "Description of the final answer format"
}}

Rules:
1. Use only the available tools listed above or null for reasoning steps
2. Break complex tasks into logical steps
3. Be specific about tool inputs
4. Each step should have a clear purpose"#
    )
}

/// Reasoning prompt for a tool-less step. Prior results render one line
/// per step in ascending step order; later steps are never visible.
pub fn build_reasoning_prompt(action: &str, context: &BTreeMap<u32, StepResult>) -> String {
    let context_str = context
        .values()
        .map(|result| {
            let output = result
                .output
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            format!("Step {}: {}", result.step_number, output)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let context_str = if context_str.is_empty() {
        "No previous context".to_string()
    } else {
        context_str
    };

    format!(
        r#"Execute this reasoning step:
Action: {action}

Previous context:
{context_str}

Provide a clear, concise response for this step."#
    )
}

pub fn build_verifier_prompt(
    original_task: &str,
    steps_summary: &str,
    collected_data: &str,
    overall_status: &str,
) -> String {
    format!(
        r#"Verify and synthesize the following execution results.

ORIGINAL USER TASK: {original_task}

EXECUTION SUMMARY:
{steps_summary}

COLLECTED DATA:
{collected_data}

OVERALL STATUS: {overall_status}

Your tasks:
1. Check if the execution addressed the user's request completely
2. Identify any missing information or errors
3. Create a clear, helpful final response for the user

Respond with JSON:
{{
    "verification_status": "complete" or "partial" or "failed",
    "issues_found": ["list of any issues or missing data"],
    "final_response": "A clear, formatted response that directly answers the user's original question",
    "suggestions": ["any suggestions for improvement or additional info the user might want"]
}}"#
    )
}
