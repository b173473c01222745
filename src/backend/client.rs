//! HTTP client for the publication backend.

use url::Url;

use super::error::{BackendError, Result};
use super::types::{ChatReply, ChatRequest, ErrorBody, Publication, SummaryQuery, TopicCount};
use super::PublicationSource;

/// HTTP implementation of [`PublicationSource`].
///
/// # Example
///
/// ```rust,no_run
/// use biocosmos_explorer::backend::{HttpBackend, PublicationSource, SummaryQuery};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:5001")?;
/// let topics = backend.topics().await?;
/// let hits = backend.summaries(&SummaryQuery::keyword("bone", "All")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a new client for the backend at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut raw = base_url.as_ref().trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the `/api/summaries` URL for a query.
    pub fn summaries_url(&self, query: &SummaryQuery) -> Result<Url> {
        let mut url = self.endpoint("api/summaries")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = &query.query {
                pairs.append_pair("query", q);
            }
            if let Some(topic) = &query.topic {
                pairs.append_pair("topic", topic);
            }
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());
        let message = serde_json::from_str::<ErrorBody>(&body).map_or(body, |b| b.error);
        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl PublicationSource for HttpBackend {
    async fn topics(&self) -> Result<Vec<TopicCount>> {
        let response = self.http.get(self.endpoint("api/topics")?).send().await?;
        Self::handle_response(response).await
    }

    async fn summaries(&self, query: &SummaryQuery) -> Result<Vec<Publication>> {
        let url = self.summaries_url(query)?;
        tracing::debug!(url = %url, "Fetching summaries");
        let response = self.http.get(url).send().await?;
        Self::handle_response(response).await
    }

    async fn chat(&self, question: &str, limit: usize) -> Result<ChatReply> {
        let req = ChatRequest {
            query: question.to_string(),
            limit: Some(limit),
        };
        let response = self
            .http
            .post(self.endpoint("api/chat")?)
            .json(&req)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries_url_keyword() {
        let backend = HttpBackend::new("http://localhost:5001").unwrap();
        let url = backend
            .summaries_url(&SummaryQuery::keyword("bone density", "Human Health"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/summaries?query=bone+density&topic=Human+Health"
        );
    }

    #[test]
    fn test_summaries_url_browse() {
        let backend = HttpBackend::new("http://localhost:5001/").unwrap();
        let url = backend
            .summaries_url(&SummaryQuery::browse("Plants", 57))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/summaries?topic=Plants&limit=57"
        );
    }

    #[test]
    fn test_summaries_url_empty_query() {
        let backend = HttpBackend::new("http://localhost:5001").unwrap();
        let url = backend.summaries_url(&SummaryQuery::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/summaries");
    }

    #[test]
    fn test_base_url_with_prefix() {
        let backend = HttpBackend::new("http://example.org/biocosmos").unwrap();
        let url = backend.endpoint("api/topics").unwrap();
        assert_eq!(url.as_str(), "http://example.org/biocosmos/api/topics");
    }
}
