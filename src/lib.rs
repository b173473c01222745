//! BioCosmos Explorer
//!
//! A server-rendered dashboard for exploring NASA space biology publications:
//! keyword and topic search, browse-by-topic, a topic distribution chart and a
//! research assistant that answers questions from retrieved studies.
//!
//! # Architecture
//!
//! - **Server**: Axum with HTMX fragments; per-visitor state lives server-side
//! - **Backend contract**: `/api/topics`, `/api/summaries`, `/api/chat` over HTTP
//! - **Embedded catalogue**: an in-process implementation of that contract
//! - **Assistant**: chat-completions client with a per-process request quota
//!
//! # Modules
//!
//! - [`api`]: embedded catalogue HTTP API
//! - [`assistant`]: prompt building, answer generation, chat error taxonomy
//! - [`backend`]: publication backend client and wire types
//! - [`catalog`]: in-memory publication catalogue
//! - [`config`]: layered configuration
//! - [`dashboard`]: page controller, sessions and dashboard routes
//! - [`llm`]: OpenAI-compatible chat-completions client
//! - [`ui`]: HTML rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod assistant;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod llm;
pub mod server;
pub mod ui;

use crate::dashboard::{PageController, SessionStore};

/// Application state shared across the dashboard handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dashboard sessions, one per visitor.
    pub sessions: SessionStore,
    /// Runs dashboard actions against the publication backend.
    pub controller: PageController,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions.len())
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}
