use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::plan::{Plan, StepSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Success,
    Failed,
    Error,
}

impl StepStatus {
    pub fn is_terminal(self) -> bool {
        self != StepStatus::Pending
    }
}

/// Outcome of a single step. Created pending, moved to exactly one
/// terminal state by the consuming transition methods, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step_number: u32,
    pub action: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,

    pub status: StepStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    pub fn pending(step: &StepSpec) -> Self {
        Self {
            step_number: step.step_number,
            action: step.action.clone(),
            tool_used: step.tool.clone(),
            status: StepStatus::Pending,
            output: None,
            error: None,
        }
    }

    pub fn succeed(mut self, output: Value) -> Self {
        self.status = StepStatus::Success;
        self.output = Some(output);
        self
    }

    /// Declared failure: the tool answered but said no. The payload is
    /// kept for diagnostic transparency.
    pub fn fail(mut self, error: String, output: Option<Value>) -> Self {
        self.status = StepStatus::Failed;
        self.error = Some(error);
        self.output = output;
        self
    }

    /// Infrastructure fault, distinct from a declared failure.
    pub fn fault(mut self, error: String) -> Self {
        self.status = StepStatus::Error;
        self.error = Some(error);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Success,
    Partial,
}

/// Everything the Executor produced for one plan, in plan order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub task_summary: String,
    pub final_output_format: String,
    pub steps: Vec<StepResult>,
    pub overall_status: OverallStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Complete,
    Partial,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub verification_status: VerificationStatus,
    pub issues_found: Vec<String>,
    /// User-facing answer; never empty, backfilled with a generic apology
    /// when the model omitted it.
    pub final_response: String,
    pub suggestions: Vec<String>,
    pub raw_execution_results: ExecutionReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport<T> {
    pub status: StageStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> StageReport<T> {
    pub fn success(payload: T) -> Self {
        Self {
            status: StageStatus::Success,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: StageStatus::Error,
            payload: None,
            error: Some(message),
        }
    }
}

/// Per-stage outcomes in pipeline order. A `None` slot means the stage
/// was never reached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning: Option<StageReport<Plan>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<StageReport<ExecutionReport>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<StageReport<VerificationReport>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Processing,
    Complete,
    Partial,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub user_task: String,
    pub stages: RunStages,
    pub final_answer: String,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
}

impl RunResult {
    pub fn new(user_task: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            user_task: user_task.to_string(),
            stages: RunStages::default(),
            final_answer: String::new(),
            status: RunStatus::Processing,
            started_at: Utc::now(),
        }
    }
}
