use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::assistant::ChatError;
use crate::backend::ErrorBody;

/// Failure of an `/api` request, rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    RateLimited(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::RateLimited => Self::RateLimited(crate::assistant::RATE_LIMIT_MESSAGE.to_string()),
            ChatError::MissingCredential { key_url } => Self::Unavailable(format!(
                "Language model API key not configured. Set LLM_API_KEY. Get your key from: {key_url}"
            )),
            ChatError::Failed(message) => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            Self::BadRequest(m) | Self::RateLimited(m) | Self::Unavailable(m) | Self::Internal(m) => m,
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_mapping() {
        assert_eq!(
            ApiError::from(ChatError::RateLimited).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        let missing = ApiError::from(ChatError::MissingCredential {
            key_url: "https://platform.openai.com/api-keys",
        });
        assert_eq!(missing.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(matches!(missing, ApiError::Unavailable(m) if m.contains("API key")));
        assert_eq!(
            ApiError::from(ChatError::Failed("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
