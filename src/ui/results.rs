//! Result list panel.

use std::fmt::Write as _;

use crate::backend::Publication;
use crate::dashboard::DashboardState;
use crate::ui::chart::topic_color;
use crate::ui::components::{badge, colored_badge};
use crate::ui::html_escape;

/// Placeholder for a successful search with no matches.
pub const NO_RESULTS: &str = "No results found";

/// Render one publication.
#[must_use]
pub fn publication_card(publication: &Publication) -> String {
    let topic = publication
        .topic
        .as_deref()
        .map(|t| colored_badge(t, topic_color(t)))
        .unwrap_or_default();
    format!(
        r#"<article class="card result"><div class="result-head"><h3><a href="{link}" target="_blank" rel="noopener noreferrer">{title}</a></h3>{topic}</div><p>{summary}</p></article>"#,
        link = html_escape(&publication.link),
        title = html_escape(&publication.title),
        summary = html_escape(&publication.summary),
    )
}

/// Render the results panel for the current state.
///
/// `oob` marks the panel for an out-of-band swap alongside another fragment.
#[must_use]
pub fn results_panel(state: &DashboardState, oob: bool) -> String {
    let mut body = String::new();

    if let Some(error) = &state.error {
        let _ = write!(
            body,
            r#"<div class="error-banner" role="alert">{}</div>"#,
            html_escape(error)
        );
    }

    if !state.has_searched {
        body.push_str(
            r#"<p class="muted">Search by keyword, browse a topic, or ask the research assistant.</p>"#,
        );
    } else if state.results.is_empty() {
        if state.error.is_none() {
            let _ = write!(body, r#"<p class="empty">{NO_RESULTS}</p>"#);
        }
    } else {
        let _ = write!(
            body,
            r#"<div class="results-count">{}</div>"#,
            badge(&format!("{} results", state.results.len()))
        );
        for publication in &state.results {
            body.push_str(&publication_card(publication));
        }
    }

    let oob = if oob { r#" hx-swap-oob="true""# } else { "" };
    format!(r#"<section id="results-panel" class="results"{oob}>{body}</section>"#)
}
