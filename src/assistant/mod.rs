//! Research assistant: turns a question plus retrieved publications into an answer.
//!
//! The same [`AnswerGenerator`] backs the embedded `/api/chat` endpoint and
//! the dashboard's direct chat mode.

mod error;
pub mod prompt;
mod quota;

pub use error::{ChatError, GENERIC_CHAT_ERROR, GENERIC_CHAT_REPLY, RATE_LIMIT_MESSAGE};
pub use quota::RequestQuota;

use std::sync::Arc;

use crate::backend::Publication;
use crate::llm::{ChatCompletionsClient, LlmError};

/// Interim chat text while publications are retrieved.
pub const SEARCHING_MESSAGE: &str = "Searching for relevant studies...";

/// Interim chat text while the model writes its answer.
pub const ANALYZING_MESSAGE: &str = "Analyzing research with AI...";

/// Fallback when the model returns no text.
pub const EMPTY_ANSWER: &str = "No response generated.";

/// Reply when retrieval finds nothing for `query`.
#[must_use]
pub fn no_studies_message(query: &str) -> String {
    format!("No studies found for \"{query}\". Try a different question or browse by topic.")
}

/// Writes an answer grounded in a set of studies.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate an answer to `question` from `studies`.
    async fn generate(&self, question: &str, studies: &[Publication]) -> Result<String, LlmError>;

    /// Where to obtain a credential for the underlying provider.
    fn key_url(&self) -> &'static str;
}

/// [`AnswerGenerator`] backed by a chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct LlmAnswerGenerator {
    client: ChatCompletionsClient,
    quota: Option<Arc<RequestQuota>>,
}

impl LlmAnswerGenerator {
    /// Create a generator, optionally gated by a request quota.
    #[must_use]
    pub fn new(client: ChatCompletionsClient, quota: Option<Arc<RequestQuota>>) -> Self {
        Self { client, quota }
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(&self, question: &str, studies: &[Publication]) -> Result<String, LlmError> {
        if self.client.settings().api_key.is_none() {
            return Err(LlmError::MissingApiKey);
        }
        if let Some(quota) = &self.quota {
            quota.check().map_err(LlmError::QuotaExceeded)?;
        }

        let messages = prompt::build_messages(question, studies);
        tracing::info!(
            name: "assistant.generate",
            model = %self.client.settings().model,
            studies = studies.len(),
            "Requesting research answer"
        );

        let answer = self.client.complete(&messages).await?;
        Ok(answer.unwrap_or_else(|| EMPTY_ANSWER.to_string()))
    }

    fn key_url(&self) -> &'static str {
        self.client.settings().provider.key_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmSettings, Provider};
    use nonzero_ext::nonzero;

    #[test]
    fn test_no_studies_message() {
        assert_eq!(
            no_studies_message("mars soil"),
            "No studies found for \"mars soil\". Try a different question or browse by topic."
        );
    }

    #[tokio::test]
    async fn test_missing_key_does_not_spend_quota() {
        let settings = LlmSettings {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            provider: Provider::OpenAI,
            temperature: 0.7,
            max_tokens: 500,
        };
        let quota = Arc::new(RequestQuota::new(nonzero!(1u32), nonzero!(10u32)));
        let generator = LlmAnswerGenerator::new(
            ChatCompletionsClient::new(settings),
            Some(Arc::clone(&quota)),
        );

        let err = generator.generate("q", &[]).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
        assert!(quota.check().is_ok());
    }

    /// Serve a fixed chat-completions body on an ephemeral port.
    async fn completion_server(body: serde_json::Value) -> String {
        let app = axum::Router::new().route(
            "/v1/chat/completions",
            axum::routing::post(move || async move { axum::Json(body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_blank_completion_falls_back() {
        let base_url = completion_server(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "   " } }]
        }))
        .await;
        let generator = LlmAnswerGenerator::new(
            ChatCompletionsClient::new(LlmSettings {
                base_url,
                api_key: Some("sk-test".to_string()),
                model: "gpt-4o-mini".to_string(),
                provider: Provider::OpenAI,
                temperature: 0.7,
                max_tokens: 500,
            }),
            None,
        );
        let study = Publication {
            id: 1,
            title: "Bone loss".to_string(),
            summary: "Mice lose bone.".to_string(),
            link: "https://example.org/1".to_string(),
            topic: None,
        };

        let answer = generator.generate("bone?", &[study]).await.unwrap();
        assert_eq!(answer, EMPTY_ANSWER);
    }
}
