use tracing::{error, info};

use crate::agents::{Executor, Planner, Verifier};
use crate::models::{RunResult, RunStatus, StageReport};

/// Sequences Planner → Executor → Verifier for one task. Fail-forward:
/// every expected failure mode lands in `RunResult.status` and
/// `stages`, never in a returned error.
pub struct Orchestrator {
    planner: Planner,
    executor: Executor,
    verifier: Verifier,
}

impl Orchestrator {
    pub fn new(planner: Planner, executor: Executor, verifier: Verifier) -> Self {
        Self {
            planner,
            executor,
            verifier,
        }
    }

    /// Runs the full pipeline. A planning fault halts everything
    /// (`failed`); an execution fault halts before verification
    /// (`partial`); a verification fault still keeps the execution
    /// report (`partial`). Per-step failures were already absorbed by
    /// the Executor and do not fault a stage.
    pub async fn run_task(&self, user_task: &str) -> RunResult {
        let mut result = RunResult::new(user_task);
        info!(run_id = %result.run_id, task = %user_task, "run started");

        let plan = match self.planner.create_plan(user_task).await {
            Ok(plan) => {
                result.stages.planning = Some(StageReport::success(plan.clone()));
                plan
            }
            Err(e) => {
                error!(run_id = %result.run_id, "planning stage fault: {e}");
                result.stages.planning = Some(StageReport::error(e.to_string()));
                result.status = RunStatus::Failed;
                result.final_answer = format!("Planning failed: {e}");
                return result;
            }
        };

        let execution = match self.executor.execute_plan(&plan).await {
            Ok(execution) => {
                result.stages.execution = Some(StageReport::success(execution.clone()));
                execution
            }
            Err(e) => {
                error!(run_id = %result.run_id, "execution stage fault: {e}");
                result.stages.execution = Some(StageReport::error(e.to_string()));
                result.status = RunStatus::Partial;
                result.final_answer = format!("Execution failed: {e}");
                return result;
            }
        };

        match self.verifier.verify_and_synthesize(user_task, execution).await {
            Ok(verification) => {
                result.final_answer = verification.final_response.clone();
                result.stages.verification = Some(StageReport::success(verification));
                result.status = RunStatus::Complete;
            }
            Err(e) => {
                error!(run_id = %result.run_id, "verification stage fault: {e}");
                result.stages.verification = Some(StageReport::error(e.to_string()));
                result.status = RunStatus::Partial;
                result.final_answer = format!("Verification failed: {e}");
            }
        }

        info!(run_id = %result.run_id, status = ?result.status, "run finished");
        result
    }
}
