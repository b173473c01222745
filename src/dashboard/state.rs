//! Dashboard UI state and its transitions.

use serde::Serialize;

use crate::assistant::{ANALYZING_MESSAGE, ChatError, SEARCHING_MESSAGE};
use crate::backend::{ALL_TOPICS, Publication, TopicCount};

/// Error shown when a search or browse request fails.
pub const SEARCH_ERROR: &str =
    "Failed to fetch results. Please ensure the backend server is running.";

/// Error shown when an action is abandoned before its response arrives.
pub const INTERRUPTED_ERROR: &str = "The request was interrupted. Please try again.";

/// Request status of the page controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is outstanding.
    Loading,
    /// The last request succeeded.
    Success,
    /// The last request failed.
    Error,
}

impl Status {
    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_loading(self) -> bool {
        self == Self::Loading
    }
}

/// Everything the dashboard renders for one visitor.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    /// Last submitted free-text query.
    pub query: String,
    /// Current topic filter; [`ALL_TOPICS`] when unfiltered.
    pub selected_topic: String,
    /// Topic aggregate fetched when the session opened.
    pub topics: Vec<TopicCount>,
    /// Last result set.
    pub results: Vec<Publication>,
    /// Last error message.
    pub error: Option<String>,
    /// Whether any search, browse or chat action has been attempted.
    pub has_searched: bool,
    /// Request status.
    pub status: Status,
    /// Most recent chat answer or interim status text.
    pub chat_response: String,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            query: String::new(),
            selected_topic: ALL_TOPICS.to_string(),
            topics: Vec::new(),
            results: Vec::new(),
            error: None,
            has_searched: false,
            status: Status::Idle,
            chat_response: String::new(),
        }
    }
}

impl DashboardState {
    /// Enter Loading for a new action.
    ///
    /// `has_searched` flips here, before any response arrives.
    pub fn begin(&mut self) {
        self.status = Status::Loading;
        self.error = None;
        self.has_searched = true;
    }

    /// Loading → Success with a fresh result set.
    pub fn succeed(&mut self, results: Vec<Publication>) {
        self.results = results;
        self.error = None;
        self.status = Status::Success;
    }

    /// Loading → Error; the previous result set is discarded.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.results.clear();
        self.error = Some(message.into());
        self.status = Status::Error;
    }

    /// Loading → Error for a chat query.
    pub fn fail_chat(&mut self, err: &ChatError) {
        self.results.clear();
        self.error = err.error_message().map(ToString::to_string);
        self.chat_response = err.chat_message();
        self.status = Status::Error;
    }

    /// Loading → Error for an action dropped before it settled.
    ///
    /// No-op when the session already left Loading.
    pub fn interrupt(&mut self) {
        if !self.status.is_loading() {
            return;
        }
        self.error = Some(INTERRUPTED_ERROR.to_string());
        if self.chat_response == SEARCHING_MESSAGE || self.chat_response == ANALYZING_MESSAGE {
            self.chat_response = INTERRUPTED_ERROR.to_string();
        }
        self.status = Status::Error;
    }

    /// Whether a topic other than "All" is selected.
    #[must_use]
    pub fn has_topic_filter(&self) -> bool {
        self.selected_topic != ALL_TOPICS
    }
}
