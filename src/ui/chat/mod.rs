//! Research assistant chat widget.

use std::fmt::Write as _;

use crate::assistant::SEARCHING_MESSAGE;
use crate::dashboard::DashboardState;
use crate::ui::components::{ButtonVariant, card_with_header, submit_button};
use crate::ui::html_escape;

/// Render the chat widget.
///
/// The input is disabled while any action is loading. The interim text is
/// shown by HTMX while the request is in flight.
#[must_use]
pub fn chat_widget(state: &DashboardState, session_id: &str) -> String {
    let loading = state.status.is_loading();
    let disabled = if loading { " disabled" } else { "" };

    let mut body = String::new();
    if !state.chat_response.is_empty() {
        // Paragraph breaks in the answer become separate blocks.
        body.push_str(r#"<div class="chat-response">"#);
        for para in state.chat_response.split("\n\n") {
            let _ = write!(body, "<p>{}</p>", html_escape(para).replace('\n', "<br>"));
        }
        body.push_str("</div>");
    }
    let _ = write!(
        body,
        r##"<p id="chat-indicator" class="htmx-indicator muted">{SEARCHING_MESSAGE}</p>
<form hx-post="/dashboard/chat" hx-target="#chat-widget" hx-swap="outerHTML" hx-indicator="#chat-indicator" hx-disabled-elt="find button">
    <input type="hidden" name="session_id" value="{sid}">
    <input type="text" name="question" placeholder="Ask about space biology research..." aria-label="Question"{disabled}>
    {button}
</form>"##,
        sid = html_escape(session_id),
        button = submit_button("Ask", ButtonVariant::Primary, loading),
    );

    format!(
        r#"<div id="chat-widget">{}</div>"#,
        card_with_header("chat", "Research Assistant", &body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_while_loading() {
        let mut state = DashboardState::default();
        assert!(!chat_widget(&state, "s").contains(" disabled"));
        state.begin();
        assert!(chat_widget(&state, "s").contains(" disabled"));
    }

    #[test]
    fn test_answer_paragraphs() {
        let state = DashboardState {
            chat_response: "First <point>.\n\nGet your key from: x".into(),
            ..Default::default()
        };
        let html = chat_widget(&state, "s");
        assert!(html.contains("<p>First &lt;point&gt;.</p>"));
        assert!(html.contains("<p>Get your key from: x</p>"));
    }
}
