//! Page controller: runs dashboard actions against a [`PublicationSource`]
//! and records their outcome in the visitor's [`DashboardSession`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::session::DashboardSession;
use super::state::{DashboardState, SEARCH_ERROR};
use crate::assistant::{
    ANALYZING_MESSAGE, AnswerGenerator, ChatError, SEARCHING_MESSAGE, no_studies_message,
};
use crate::backend::{ALL_TOPICS, PublicationSource, SummaryQuery, TopicCount};

/// Upper bound on a browse request.
pub const BROWSE_CAP: usize = 200;

/// Browse size when the selected topic's count is unknown.
pub const BROWSE_FALLBACK: usize = 100;

/// Number of publications browse-by-topic asks for.
#[must_use]
pub fn browse_limit(topics: &[TopicCount], topic: &str) -> usize {
    topics
        .iter()
        .find(|t| t.name == topic)
        .map_or(BROWSE_FALLBACK, |t| {
            usize::try_from(t.count).map_or(BROWSE_CAP, |c| c.min(BROWSE_CAP))
        })
}

/// How chat questions are answered.
#[derive(Clone)]
pub enum ChatStrategy {
    /// Delegate retrieval and generation to the backend's `/api/chat`.
    Backend {
        /// Shown when the backend reports a credential problem.
        key_url: &'static str,
    },
    /// Retrieve via `/api/summaries`, then call the model from this server.
    Direct(Arc<dyn AnswerGenerator>),
}

impl std::fmt::Debug for ChatStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend { key_url } => f.debug_struct("Backend").field("key_url", key_url).finish(),
            Self::Direct(_) => f.write_str("Direct"),
        }
    }
}

/// Moves the session out of Loading when an action future is dropped
/// mid-flight, e.g. by the request timeout.
struct PendingAction<'a> {
    session: &'a DashboardSession,
    settled: bool,
}

impl<'a> PendingAction<'a> {
    fn new(session: &'a DashboardSession) -> Self {
        Self {
            session,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingAction<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(session = %self.session.id(), "Dashboard action interrupted");
            self.session.update(DashboardState::interrupt);
        }
    }
}

/// Executes dashboard actions.
///
/// Stateless apart from its dependencies; all per-visitor state lives in the
/// session passed to each call. Session locks are never held across an
/// `.await`, so concurrent actions interleave and the last to finish wins.
#[derive(Clone)]
pub struct PageController {
    source: Arc<dyn PublicationSource>,
    chat: ChatStrategy,
    chat_limit: usize,
}

impl std::fmt::Debug for PageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("chat", &self.chat)
            .field("chat_limit", &self.chat_limit)
            .finish_non_exhaustive()
    }
}

impl PageController {
    /// Create a controller.
    #[must_use]
    pub fn new(source: Arc<dyn PublicationSource>, chat: ChatStrategy, chat_limit: usize) -> Self {
        Self {
            source,
            chat,
            chat_limit,
        }
    }

    /// Fetch the topic aggregate into the session.
    ///
    /// Failure leaves the topic list empty; the selector then offers "All" only.
    pub async fn load_topics(&self, session: &DashboardSession) {
        match self.source.topics().await {
            Ok(topics) => {
                debug!(session = %session.id(), topics = topics.len(), "Topics loaded");
                session.update(|s| s.topics = topics);
            }
            Err(e) => {
                warn!(session = %session.id(), error = %e, "Failed to fetch topics");
            }
        }
    }

    /// Change the topic filter.
    pub fn select_topic(&self, session: &DashboardSession, topic: &str) {
        let topic = if topic.trim().is_empty() {
            ALL_TOPICS
        } else {
            topic
        };
        session.update(|s| s.selected_topic = topic.to_string());
    }

    /// Keyword search within the selected topic.
    ///
    /// `query` must already be validated as non-empty.
    pub async fn search(&self, session: &DashboardSession, query: &str) {
        let request = session.update(|s| {
            s.query = query.to_string();
            s.begin();
            SummaryQuery::keyword(query, &s.selected_topic)
        });

        info!(
            name: "dashboard.search",
            session = %session.id(),
            query = %query,
            topic = request.topic.as_deref().unwrap_or(ALL_TOPICS),
            "Searching publications"
        );
        self.run_summaries(session, &request).await;
    }

    /// List publications of the selected topic.
    ///
    /// Does nothing while "All" is selected.
    pub async fn browse(&self, session: &DashboardSession) {
        let request = session.update(|s| {
            if !s.has_topic_filter() {
                return None;
            }
            let limit = browse_limit(&s.topics, &s.selected_topic);
            s.begin();
            Some(SummaryQuery::browse(s.selected_topic.clone(), limit))
        });
        let Some(request) = request else {
            return;
        };

        info!(
            name: "dashboard.browse",
            session = %session.id(),
            topic = request.topic.as_deref().unwrap_or_default(),
            limit = request.limit.unwrap_or_default(),
            "Browsing topic"
        );
        self.run_summaries(session, &request).await;
    }

    async fn run_summaries(&self, session: &DashboardSession, request: &SummaryQuery) {
        let pending = PendingAction::new(session);
        let outcome = self.source.summaries(request).await;
        pending.settle();
        match outcome {
            Ok(results) => {
                debug!(session = %session.id(), results = results.len(), "Summaries received");
                session.update(|s| s.succeed(results));
            }
            Err(e) => {
                warn!(session = %session.id(), error = %e, "Summaries request failed");
                session.update(|s| s.fail(SEARCH_ERROR));
            }
        }
    }

    /// Answer a research question.
    ///
    /// Blank questions, and questions sent while another action is loading,
    /// are ignored.
    pub async fn ask(&self, session: &DashboardSession, question: &str) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }
        let started = session.update(|s| {
            if s.status.is_loading() {
                return false;
            }
            s.begin();
            s.chat_response = SEARCHING_MESSAGE.to_string();
            true
        });
        if !started {
            debug!(session = %session.id(), "Chat ignored while loading");
            return;
        }

        let mode = match self.chat {
            ChatStrategy::Backend { .. } => "backend",
            ChatStrategy::Direct(_) => "direct",
        };
        info!(name: "dashboard.chat", session = %session.id(), mode, "Answering question");

        let pending = PendingAction::new(session);
        let outcome = match &self.chat {
            ChatStrategy::Backend { key_url } => self.ask_backend(session, question, *key_url).await,
            ChatStrategy::Direct(generator) => {
                self.ask_direct(session, question, generator.as_ref()).await
            }
        };
        pending.settle();

        if let Err(err) = outcome {
            warn!(session = %session.id(), error = %err, "Chat failed");
            session.update(|s| s.fail_chat(&err));
        }
    }

    async fn ask_backend(
        &self,
        session: &DashboardSession,
        question: &str,
        key_url: &'static str,
    ) -> Result<(), ChatError> {
        let reply = self
            .source
            .chat(question, self.chat_limit)
            .await
            .map_err(|e| ChatError::from_backend(&e, key_url))?;

        session.update(|s| {
            s.chat_response = if reply.results.is_empty() {
                no_studies_message(question)
            } else {
                reply.response
            };
            s.succeed(reply.results);
        });
        Ok(())
    }

    async fn ask_direct(
        &self,
        session: &DashboardSession,
        question: &str,
        generator: &dyn AnswerGenerator,
    ) -> Result<(), ChatError> {
        let key_url = generator.key_url();
        let request = SummaryQuery {
            query: Some(question.to_string()),
            ..SummaryQuery::default()
        }
        .with_limit(self.chat_limit);
        let studies = self
            .source
            .summaries(&request)
            .await
            .map_err(|e| ChatError::from_backend(&e, key_url))?;

        if studies.is_empty() {
            session.update(|s| {
                s.chat_response = no_studies_message(question);
                s.succeed(Vec::new());
            });
            return Ok(());
        }

        session.update(|s| {
            s.results = studies.clone();
            s.chat_response = ANALYZING_MESSAGE.to_string();
        });

        let answer = generator
            .generate(question, &studies)
            .await
            .map_err(|e| ChatError::from_llm(&e, key_url))?;

        session.update(|s| {
            s.chat_response = answer;
            s.succeed(studies);
        });
        Ok(())
    }
}
