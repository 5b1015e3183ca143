pub mod gateway;
pub mod gemini;

use async_trait::async_trait;

use crate::error::Result;

pub use gateway::ModelGateway;
pub use gemini::GeminiTransport;

/// The single call the pipeline needs from a model backend. Session
/// identifiers are opaque conversation-scoping tokens; the transport may
/// use or ignore them.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str, session_id: &str) -> Result<String>;
}
