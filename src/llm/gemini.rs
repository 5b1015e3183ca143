use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::llm::ModelTransport;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini `generateContent` REST transport. Stateless per call; the
/// session id is only carried through for tracing.
pub struct GeminiTransport {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiTransport {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
        }
    }
}

#[async_trait]
impl ModelTransport for GeminiTransport {
    async fn generate(&self, system: &str, prompt: &str, session_id: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(Error::ModelUnavailable(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = json!({
            "system_instruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        debug!(session_id, model = %self.model, "gemini request");

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ModelUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ModelUnavailable(format!(
                "Gemini API error: {status}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::ModelUnavailable(e.to_string()))?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::ModelUnavailable("empty candidate in response".to_string()))
    }
}
