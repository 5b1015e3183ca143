use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::Result;
use crate::llm::ModelTransport;
use crate::utils::StripCodeBlock;

const JSON_INSTRUCTION: &str = "IMPORTANT: Respond ONLY with valid JSON. No markdown, no code blocks, no explanations.\nStart directly with { and end with }";

/// Wraps a model transport with a stage-specific system message and a
/// recovery ladder for structured output.
#[derive(Clone)]
pub struct ModelGateway {
    transport: Arc<dyn ModelTransport>,
    system_message: String,
}

impl ModelGateway {
    pub fn new(transport: Arc<dyn ModelTransport>, system_message: impl Into<String>) -> Self {
        Self {
            transport,
            system_message: system_message.into(),
        }
    }

    /// Plain text generation. Fails with `ModelUnavailable` when the
    /// underlying call cannot be completed.
    pub async fn generate(&self, prompt: &str, session_id: &str) -> Result<String> {
        debug!(session_id, "model call");
        self.transport
            .generate(&self.system_message, prompt, session_id)
            .await
    }

    /// Structured generation. Appends a strict JSON instruction, then tries
    /// to salvage an object from whatever came back: fence strip, direct
    /// parse, brace scan. When nothing parses, returns the
    /// `{error, raw}` sentinel instead of failing, so callers can branch
    /// on a degraded result. Only a transport fault produces `Err`.
    pub async fn generate_structured(&self, prompt: &str, session_id: &str) -> Result<Value> {
        let json_prompt = format!("{prompt}\n\n{JSON_INSTRUCTION}");
        let response = self.generate(&json_prompt, session_id).await?;
        let doc = recover_document(&response);
        if doc.get("error").is_some() && doc.get("raw").is_some() {
            warn!(session_id, "structured output recovery failed");
        }
        Ok(doc)
    }
}

/// The recovery ladder, separated out so it can be tested without a
/// transport. `raw` in the sentinel carries the original, untrimmed text.
pub(crate) fn recover_document(response: &str) -> Value {
    let cleaned = response.strip_code_block();

    if let Ok(value) = serde_json::from_str::<Value>(cleaned)
        && value.is_object()
    {
        return value;
    }

    // Leading prose before a balanced object is the common failure mode;
    // scan for the outermost braces and retry.
    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}'))
        && start < end
        && let Ok(value) = serde_json::from_str::<Value>(&cleaned[start..=end])
        && value.is_object()
    {
        return value;
    }

    json!({
        "error": "Failed to parse JSON",
        "raw": response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let doc = recover_document("{\"steps\": []}");
        assert_eq!(doc["steps"], json!([]));
    }

    #[test]
    fn fence_strip_round_trips() {
        let inner = "{\"task_summary\": \"check weather\", \"steps\": [1, 2]}";
        let fenced = format!("```json\n{inner}\n```");
        assert_eq!(
            recover_document(&fenced),
            serde_json::from_str::<Value>(inner).unwrap()
        );
    }

    #[test]
    fn brace_scan_recovers_object_after_prose() {
        let text = "Sure! Here is the plan you asked for:\n{\"steps\": [{\"step_number\": 1}]}";
        let doc = recover_document(text);
        assert_eq!(doc["steps"][0]["step_number"], json!(1));
    }

    #[test]
    fn unparseable_text_yields_sentinel_with_original_raw() {
        let text = "  I am unable to produce a plan today.  ";
        let doc = recover_document(text);
        assert_eq!(doc["error"], json!("Failed to parse JSON"));
        assert_eq!(doc["raw"], json!(text));
    }

    #[test]
    fn non_object_json_yields_sentinel() {
        let doc = recover_document("[1, 2, 3]");
        assert_eq!(doc["error"], json!("Failed to parse JSON"));
    }

    #[test]
    fn unbalanced_braces_yield_sentinel() {
        let doc = recover_document("prose } then { more prose");
        assert_eq!(doc["error"], json!("Failed to parse JSON"));
    }
}
