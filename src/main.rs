use std::env;
use std::sync::Arc;

use ops_assistant::agents::{Executor, Orchestrator, Planner, Verifier};
use ops_assistant::config::Config;
use ops_assistant::llm::{GeminiTransport, ModelGateway, ModelTransport};
use ops_assistant::models::RunStatus;
use ops_assistant::prompt::builder::{
    EXECUTOR_SYSTEM_MESSAGE, PLANNER_SYSTEM_MESSAGE, VERIFIER_SYSTEM_MESSAGE,
};
use ops_assistant::tools::default_registry;
use tracing_subscriber::EnvFilter;

fn build_orchestrator(config: &Config) -> Orchestrator {
    let transport: Arc<dyn ModelTransport> = Arc::new(GeminiTransport::new(config));
    let registry = Arc::new(default_registry(config));

    let planner = Planner::new(
        ModelGateway::new(transport.clone(), PLANNER_SYSTEM_MESSAGE),
        registry.clone(),
    );
    let executor = Executor::new(
        ModelGateway::new(transport.clone(), EXECUTOR_SYSTEM_MESSAGE),
        registry,
    );
    let verifier = Verifier::new(ModelGateway::new(transport, VERIFIER_SYSTEM_MESSAGE));

    Orchestrator::new(planner, executor, verifier)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: ops-assistant <your task>");
        eprintln!("Example: ops-assistant 'What is the weather in London?'");
        std::process::exit(1);
    }
    let task = args.join(" ");

    let orchestrator = build_orchestrator(&Config::from_env());

    println!("Processing task: {task}\n");
    let result = orchestrator.run_task(&task).await;

    if let Some(execution) = result
        .stages
        .execution
        .as_ref()
        .and_then(|stage| stage.payload.as_ref())
    {
        println!("Steps:");
        for step in &execution.steps {
            println!(
                "  {}. [{:?}] {}",
                step.step_number,
                step.status,
                step.error.as_deref().unwrap_or(&step.action),
            );
        }
        println!();
    }

    println!("Final answer:\n{}", result.final_answer);

    if result.status != RunStatus::Complete {
        std::process::exit(1);
    }
}
