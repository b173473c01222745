//! Wire types for the publication backend.
//!
//! Field names follow the backend's JSON, which capitalises publication
//! columns (`Title`, `Summary`, `Link`, `Topic`) but not `id`.

use serde::{Deserialize, Serialize};

/// Topic filter value meaning "no filter".
pub const ALL_TOPICS: &str = "All";

// =============================================================================
// Publications
// =============================================================================

/// A single publication record as returned by `/api/summaries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Unique identifier within a result set.
    pub id: u64,
    /// Publication title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Short synthesised summary.
    #[serde(rename = "Summary")]
    pub summary: String,
    /// External link to the full text.
    #[serde(rename = "Link")]
    pub link: String,
    /// Topic label, when the backend has categorised the record.
    #[serde(rename = "Topic", default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// Publication count for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    /// Topic name.
    pub name: String,
    /// Number of publications tagged with the topic.
    pub count: u64,
}

/// Parameters for `/api/summaries`.
///
/// Every field is optional; absent fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Topic name filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SummaryQuery {
    /// Keyword search, optionally narrowed to a topic.
    ///
    /// The [`ALL_TOPICS`] sentinel is treated as no topic.
    #[must_use]
    pub fn keyword(query: impl Into<String>, topic: &str) -> Self {
        Self {
            query: Some(query.into()),
            topic: (topic != ALL_TOPICS).then(|| topic.to_string()),
            limit: None,
        }
    }

    /// Every publication under `topic`, up to `limit`.
    #[must_use]
    pub fn browse(topic: impl Into<String>, limit: usize) -> Self {
        Self {
            query: None,
            topic: Some(topic.into()),
            limit: Some(limit),
        }
    }

    /// Set the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

// =============================================================================
// Chat
// =============================================================================

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question.
    pub query: String,
    /// Number of publications to retrieve as context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Response of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Generated answer text.
    pub response: String,
    /// Publications the answer was based on.
    #[serde(default)]
    pub results: Vec<Publication>,
}

/// Error body returned by the backend on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_wire_names() {
        let json = r#"{"id":7,"Title":"Bone loss","Summary":"s","Link":"https://x","Topic":"Human Health"}"#;
        let p: Publication = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.title, "Bone loss");
        assert_eq!(p.topic.as_deref(), Some("Human Health"));
    }

    #[test]
    fn test_publication_without_topic() {
        let json = r#"{"id":1,"Title":"t","Summary":"s","Link":"l"}"#;
        let p: Publication = serde_json::from_str(json).unwrap();
        assert!(p.topic.is_none());

        let back = serde_json::to_value(&p).unwrap();
        assert!(back.get("Topic").is_none());
    }

    #[test]
    fn test_keyword_query_drops_all_sentinel() {
        let q = SummaryQuery::keyword("bone", ALL_TOPICS);
        assert_eq!(q.topic, None);

        let q = SummaryQuery::keyword("bone", "Plants");
        assert_eq!(q.topic.as_deref(), Some("Plants"));
        assert_eq!(q.limit, None);
    }
}
