//! Publication backend contract.
//!
//! The dashboard never reads the catalogue directly; it goes through a
//! [`PublicationSource`], normally the [`HttpBackend`] pointed at
//! `/api/topics`, `/api/summaries` and `/api/chat`.

mod client;
mod error;
mod types;

pub use client::HttpBackend;
pub use error::{BackendError, Result};
pub use types::{
    ALL_TOPICS, ChatReply, ChatRequest, ErrorBody, Publication, SummaryQuery, TopicCount,
};

/// Source of publications and topic aggregates.
#[async_trait::async_trait]
pub trait PublicationSource: Send + Sync {
    /// List every topic with its publication count.
    async fn topics(&self) -> Result<Vec<TopicCount>>;

    /// Search or browse publications.
    async fn summaries(&self, query: &SummaryQuery) -> Result<Vec<Publication>>;

    /// Ask the backend to retrieve context and answer `question` itself.
    async fn chat(&self, question: &str, limit: usize) -> Result<ChatReply>;
}
