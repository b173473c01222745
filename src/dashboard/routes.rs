//! Dashboard HTTP surface: full pages and the HTMX fragments.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{debug, info};

use super::session::DashboardSession;
use crate::AppState;
use crate::ui::{
    chat::chat_widget,
    html_escape,
    pages::{dashboard_page, landing_page},
    results::results_panel,
    search::{browse_control, validate_query, validation_fragment},
};

const HX_RETARGET: HeaderName = HeaderName::from_static("hx-retarget");
const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");

/// Build the dashboard router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing))
        .route("/dashboard", get(open_dashboard))
        .route("/dashboard/search", post(search))
        .route("/dashboard/topic", post(select_topic))
        .route("/dashboard/browse", post(browse))
        .route("/dashboard/chat", post(chat))
        .route("/dashboard/state", get(state_snapshot))
}

#[derive(Debug, Deserialize)]
struct SessionParams {
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchForm {
    session_id: String,
    #[serde(default)]
    query: String,
    #[serde(default)]
    topic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TopicForm {
    session_id: String,
    #[serde(default)]
    topic: String,
}

#[derive(Debug, Deserialize)]
struct ChatForm {
    session_id: String,
    #[serde(default)]
    question: String,
}

/// Look up a session, or answer with an "expired" fragment.
fn find_session(state: &AppState, id: &str) -> Result<DashboardSession, Response> {
    state.sessions.get(id).ok_or_else(|| {
        debug!(session = %id, "Unknown dashboard session");
        (
            StatusCode::NOT_FOUND,
            Html(format!(
                r#"<div class="error-banner" role="alert">Session {} has expired. <a href="/dashboard">Reload the dashboard</a>.</div>"#,
                html_escape(id)
            )),
        )
            .into_response()
    })
}

async fn landing() -> Html<String> {
    Html(landing_page())
}

async fn open_dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.sessions.create();
    info!(name: "dashboard.session.created", session = %session.id(), "Dashboard session created");
    state.controller.load_topics(&session).await;
    Html(dashboard_page(&session.snapshot(), session.id()))
}

async fn search(State(state): State<Arc<AppState>>, Form(form): Form<SearchForm>) -> Response {
    let session = match find_session(&state, &form.session_id) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let query = match validate_query(&form.query) {
        Ok(q) => q,
        Err(message) => {
            return (
                [
                    (HX_RETARGET, HeaderValue::from_static("#search-feedback")),
                    (HX_RESWAP, HeaderValue::from_static("outerHTML")),
                ],
                Html(validation_fragment(message)),
            )
                .into_response();
        }
    };

    if let Some(topic) = &form.topic {
        state.controller.select_topic(&session, topic);
    }
    state.controller.search(&session, query).await;

    let snapshot = session.snapshot();
    Html(format!(
        r#"{}<div id="search-feedback" hx-swap-oob="true"></div>"#,
        results_panel(&snapshot, false)
    ))
    .into_response()
}

async fn select_topic(State(state): State<Arc<AppState>>, Form(form): Form<TopicForm>) -> Response {
    let session = match find_session(&state, &form.session_id) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    state.controller.select_topic(&session, &form.topic);
    Html(browse_control(&session.snapshot(), session.id())).into_response()
}

async fn browse(State(state): State<Arc<AppState>>, Form(form): Form<TopicForm>) -> Response {
    let session = match find_session(&state, &form.session_id) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    state.controller.select_topic(&session, &form.topic);
    state.controller.browse(&session).await;
    Html(results_panel(&session.snapshot(), false)).into_response()
}

async fn chat(State(state): State<Arc<AppState>>, Form(form): Form<ChatForm>) -> Response {
    let session = match find_session(&state, &form.session_id) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    state.controller.ask(&session, &form.question).await;

    let snapshot = session.snapshot();
    Html(format!(
        "{}{}",
        chat_widget(&snapshot, session.id()),
        results_panel(&snapshot, true)
    ))
    .into_response()
}

async fn state_snapshot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SessionParams>,
) -> Response {
    match state.sessions.get(&params.session_id) {
        Some(session) => Json(session.snapshot()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
