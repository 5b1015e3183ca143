pub mod plan;
pub mod report;

pub use plan::{Plan, StepSpec};
pub use report::{
    ExecutionReport, OverallStatus, RunResult, RunStages, RunStatus, StageReport, StageStatus,
    StepResult, StepStatus, VerificationReport, VerificationStatus,
};
