//! Search form, topic selector and browse control.

use std::fmt::Write as _;

use crate::backend::{ALL_TOPICS, TopicCount};
use crate::dashboard::{DashboardState, browse_limit};
use crate::ui::components::{ButtonVariant, submit_button};
use crate::ui::html_escape;

/// Validation message for an empty search.
pub const QUERY_REQUIRED: &str = "Please enter a search query";

/// Trim a search submission, rejecting blank input.
///
/// # Errors
///
/// Returns [`QUERY_REQUIRED`] when the query is empty after trimming.
pub fn validate_query(raw: &str) -> Result<&str, &'static str> {
    let query = raw.trim();
    if query.is_empty() {
        Err(QUERY_REQUIRED)
    } else {
        Ok(query)
    }
}

/// `<select>` with "All" followed by every known topic.
#[must_use]
pub fn topic_select(topics: &[TopicCount], selected: &str) -> String {
    let mut html = String::from(
        r##"<select name="topic" id="topic-select" hx-post="/dashboard/topic" hx-trigger="change" hx-target="#browse-control" hx-swap="outerHTML" hx-include="#session-field">"##,
    );
    let option = |html: &mut String, value: &str, label: &str| {
        let sel = if value == selected { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{v}"{sel}>{l}</option>"#,
            v = html_escape(value),
            l = html_escape(label),
        );
    };

    option(&mut html, ALL_TOPICS, "All Topics");
    for topic in topics {
        option(&mut html, &topic.name, &format!("{} ({})", topic.name, topic.count));
    }
    html.push_str("</select>");
    html
}

/// Browse button, shown only when a topic is selected.
#[must_use]
pub fn browse_control(state: &DashboardState, session_id: &str) -> String {
    if !state.has_topic_filter() {
        return r#"<div id="browse-control"></div>"#.to_string();
    }
    let limit = browse_limit(&state.topics, &state.selected_topic);
    format!(
        r##"<div id="browse-control"><form hx-post="/dashboard/browse" hx-target="#results-panel" hx-swap="outerHTML" hx-indicator="#search-indicator"><input type="hidden" name="session_id" value="{sid}"><input type="hidden" name="topic" value="{topic}">{button}</form></div>"##,
        sid = html_escape(session_id),
        topic = html_escape(&state.selected_topic),
        button = submit_button(
            &format!("Browse {} (up to {limit})", html_escape(&state.selected_topic)),
            ButtonVariant::Secondary,
            state.status.is_loading(),
        ),
    )
}

/// Search form with keyword input and topic filter.
#[must_use]
pub fn search_form(state: &DashboardState, session_id: &str) -> String {
    format!(
        r##"<form id="search-form" class="search-form" hx-post="/dashboard/search" hx-target="#results-panel" hx-swap="outerHTML" hx-indicator="#search-indicator">
    <input type="hidden" id="session-field" name="session_id" value="{sid}">
    <input type="text" name="query" value="{query}" placeholder="Search publications, e.g. bone density" aria-label="Search query">
    {select}
    {button}
    <span id="search-indicator" class="htmx-indicator">Searching...</span>
</form>
<div id="search-feedback"></div>
{browse}"##,
        sid = html_escape(session_id),
        query = html_escape(&state.query),
        select = topic_select(&state.topics, &state.selected_topic),
        button = submit_button("Search", ButtonVariant::Primary, state.status.is_loading()),
        browse = browse_control(state, session_id),
    )
}

/// Inline validation message, swapped into `#search-feedback`.
#[must_use]
pub fn validation_fragment(message: &str) -> String {
    format!(
        r#"<div id="search-feedback" class="validation" role="alert">{}</div>"#,
        html_escape(message)
    )
}
