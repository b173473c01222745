//! Chat failure classification and the messages shown for each class.

use thiserror::Error;

use crate::backend::BackendError;
use crate::llm::LlmError;

/// Tier-limit text shown when the language model quota is exhausted.
pub const RATE_LIMIT_MESSAGE: &str = "⚠️ Rate limit reached. The language model free tier allows \
15 requests per minute and 1,500 requests per day. Please wait a moment and try again.";

/// Chat reply shown for unclassified failures.
pub const GENERIC_CHAT_REPLY: &str = "Sorry, I couldn't process your question. Please try again.";

/// Error banner shown for unclassified failures.
pub const GENERIC_CHAT_ERROR: &str =
    "Failed to process your question. Please check the server logs for details.";

/// Why a chat query failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The provider credential is missing or was rejected.
    #[error("language model credential missing or invalid")]
    MissingCredential {
        /// Where to obtain a key.
        key_url: &'static str,
    },

    /// Provider or local quota exhausted.
    #[error("language model rate limit exceeded")]
    RateLimited,

    /// Anything else.
    #[error("chat failed: {0}")]
    Failed(String),
}

impl ChatError {
    /// Classify a failure from its HTTP status and message.
    #[must_use]
    pub fn classify(status: Option<u16>, message: &str, key_url: &'static str) -> Self {
        let lower = message.to_lowercase();

        if status == Some(429) || lower.contains("rate limit") || lower.contains("quota") {
            Self::RateLimited
        } else if matches!(status, Some(401 | 403))
            || lower.contains("api key")
            || lower.contains("api_key")
        {
            Self::MissingCredential { key_url }
        } else {
            Self::Failed(message.to_string())
        }
    }

    /// Classify an LLM client failure.
    #[must_use]
    pub fn from_llm(err: &LlmError, key_url: &'static str) -> Self {
        match err {
            LlmError::MissingApiKey => Self::MissingCredential { key_url },
            LlmError::QuotaExceeded(_) => Self::RateLimited,
            LlmError::Status { status, message } => Self::classify(Some(*status), message, key_url),
            LlmError::Http(e) => {
                Self::classify(e.status().map(|s| s.as_u16()), &e.to_string(), key_url)
            }
        }
    }

    /// Classify a backend failure on `/api/chat` or `/api/summaries`.
    #[must_use]
    pub fn from_backend(err: &BackendError, key_url: &'static str) -> Self {
        match err {
            BackendError::Status { status, message } => {
                Self::classify(Some(*status), message, key_url)
            }
            other => Self::classify(other.status(), &other.to_string(), key_url),
        }
    }

    /// Text for the chat widget.
    #[must_use]
    pub fn chat_message(&self) -> String {
        match self {
            Self::MissingCredential { key_url } => format!(
                "⚠️ Language model API key not configured. Set LLM_API_KEY in your environment or .env file.\n\nGet your key from: {key_url}"
            ),
            Self::RateLimited => RATE_LIMIT_MESSAGE.to_string(),
            Self::Failed(_) => GENERIC_CHAT_REPLY.to_string(),
        }
    }

    /// Text for the page-level error banner, if this class shows one.
    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Failed(_) => Some(GENERIC_CHAT_ERROR),
            Self::MissingCredential { .. } | Self::RateLimited => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_URL: &str = "https://platform.openai.com/api-keys";

    #[test]
    fn test_status_429_is_rate_limit() {
        let err = ChatError::classify(Some(429), "Too Many Requests", KEY_URL);
        assert_eq!(err, ChatError::RateLimited);
        let text = err.chat_message();
        assert!(text.contains("15 requests per minute"));
        assert!(text.contains("1,500 requests per day"));
        assert!(err.error_message().is_none());
    }

    #[test]
    fn test_rate_limit_phrase_without_status() {
        let err = ChatError::classify(None, "Rate limit exceeded: 15 requests per minute", KEY_URL);
        assert_eq!(err, ChatError::RateLimited);
        let err = ChatError::classify(Some(500), "API quota exceeded", KEY_URL);
        assert_eq!(err, ChatError::RateLimited);
    }

    #[test]
    fn test_credential_errors() {
        let err = ChatError::classify(Some(401), "Unauthorized", KEY_URL);
        assert!(matches!(err, ChatError::MissingCredential { .. }));
        assert!(err.chat_message().contains(KEY_URL));

        let err = ChatError::classify(Some(503), "Language model API key not configured", KEY_URL);
        assert!(matches!(err, ChatError::MissingCredential { .. }));

        let err = ChatError::from_llm(&LlmError::MissingApiKey, KEY_URL);
        assert!(matches!(err, ChatError::MissingCredential { .. }));
    }

    #[test]
    fn test_generic_failure() {
        let err = ChatError::classify(Some(500), "boom", KEY_URL);
        assert_eq!(err, ChatError::Failed("boom".to_string()));
        assert_eq!(err.chat_message(), GENERIC_CHAT_REPLY);
        assert_eq!(err.error_message(), Some(GENERIC_CHAT_ERROR));
    }

    #[test]
    fn test_local_quota_maps_to_rate_limit() {
        let err = ChatError::from_llm(
            &LlmError::QuotaExceeded("Daily limit exceeded".into()),
            KEY_URL,
        );
        assert_eq!(err, ChatError::RateLimited);
    }
}
