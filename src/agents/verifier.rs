use serde_json::{Value, json};
use tracing::info;

use crate::error::Result;
use crate::llm::ModelGateway;
use crate::models::{ExecutionReport, StepStatus, VerificationReport, VerificationStatus};
use crate::prompt::builder::build_verifier_prompt;

const SESSION_ID: &str = "verifier";
const FALLBACK_RESPONSE: &str = "Unable to generate a complete response. Please try again.";

/// Audits execution results against the original task and synthesizes
/// the user-facing answer.
pub struct Verifier {
    gateway: ModelGateway,
}

impl Verifier {
    pub fn new(gateway: ModelGateway) -> Self {
        Self { gateway }
    }

    /// Asks the model for a structured audit, then backfills every field
    /// the model omitted so the report is always total. The raw
    /// ExecutionReport is attached regardless of what the model said.
    pub async fn verify_and_synthesize(
        &self,
        original_task: &str,
        execution: ExecutionReport,
    ) -> Result<VerificationReport> {
        let mut steps_summary = Vec::new();
        let mut tool_outputs = Vec::new();
        let mut has_errors = false;

        for step in &execution.steps {
            if step.status == StepStatus::Success && step.output.is_some() {
                if let Some(tool) = &step.tool_used {
                    tool_outputs.push(json!({
                        "tool": tool,
                        "data": step.output,
                    }));
                }
                steps_summary.push(format!("Step {}: SUCCESS - {}", step.step_number, step.action));
            } else {
                has_errors = true;
                let status = serde_json::to_string(&step.status)?;
                steps_summary.push(format!(
                    "Step {}: {} - {}",
                    step.step_number,
                    status.trim_matches('"').to_uppercase(),
                    step.error.as_deref().unwrap_or("Unknown error"),
                ));
            }
        }

        let overall_status = serde_json::to_string(&execution.overall_status)?;
        let prompt = build_verifier_prompt(
            original_task,
            &steps_summary.join("\n"),
            &serde_json::to_string(&tool_outputs)?,
            overall_status.trim_matches('"'),
        );

        let doc = self.gateway.generate_structured(&prompt, SESSION_ID).await?;
        let report = Self::backfill(doc, has_errors, execution);
        info!(status = ?report.verification_status, "verification complete");
        Ok(report)
    }

    fn backfill(
        doc: Value,
        has_errors: bool,
        execution: ExecutionReport,
    ) -> VerificationReport {
        let final_response = doc
            .get("final_response")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_RESPONSE)
            .to_string();

        let verification_status = doc
            .get("verification_status")
            .and_then(|v| v.as_str())
            .and_then(|s| match s {
                "complete" => Some(VerificationStatus::Complete),
                "partial" => Some(VerificationStatus::Partial),
                "failed" => Some(VerificationStatus::Failed),
                _ => None,
            })
            .unwrap_or(if has_errors {
                VerificationStatus::Partial
            } else {
                VerificationStatus::Complete
            });

        VerificationReport {
            verification_status,
            issues_found: string_list(doc.get("issues_found")),
            final_response,
            suggestions: string_list(doc.get("suggestions")),
            raw_execution_results: execution,
        }
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
