//! OpenAI Chat Completions API client.
//!
//! Issues a single non-streaming `/v1/chat/completions` request and returns
//! the assistant text of the first choice.

use serde::Deserialize;

use super::{LlmError, LlmSettings, Message};

/// Client for the Chat Completions API.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("base_url", &self.settings.base_url)
            .field("model", &self.settings.model)
            .field("provider", &self.settings.provider)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    /// Create a new client with the given settings.
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Settings this client was built with.
    #[must_use]
    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Request body for a completion over `messages`.
    #[must_use]
    pub fn request_body(&self, messages: &[Message]) -> serde_json::Value {
        serde_json::json!({
            "model": self.settings.model,
            "messages": messages,
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        })
    }

    /// Run a completion and return the first choice's text.
    ///
    /// Returns `Ok(None)` when the provider answered without any content.
    pub async fn complete(&self, messages: &[Message]) -> Result<Option<String>, LlmError> {
        let Some(api_key) = &self.settings.api_key else {
            return Err(LlmError::MissingApiKey);
        };

        let url = self.settings.provider.build_chat_url(&self.settings.base_url);
        let mut rb = self.http.post(&url).json(&self.request_body(messages));
        rb = if self.settings.provider.uses_api_key_header() {
            rb.header("api-key", api_key)
        } else {
            rb.bearer_auth(api_key)
        };

        let resp = rb.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Chat completion rejected");
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: CompletionResponse = resp.json().await?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty()))
    }
}
