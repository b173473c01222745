//! Full pages: the shared shell, the landing page and the dashboard.

use crate::dashboard::DashboardState;
use crate::ui::chart::topic_chart;
use crate::ui::chat::chat_widget;
use crate::ui::components::card_with_header;
use crate::ui::html_escape;
use crate::ui::results::results_panel;
use crate::ui::search::search_form;

/// Wrap page content in the application shell.
#[must_use]
pub fn html_shell(title: &str, content: &str) -> String {
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Explore NASA space biology research publications">
    <title>{title} - BioCosmos Explorer</title>
    <script src="https://unpkg.com/htmx.org@2.0.8"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
    <header class="app-header">
        <a href="/" class="brand">BioCosmos Explorer</a>
        <nav hx-boost="true">
            <a href="/">Home</a>
            <a href="/dashboard">Dashboard</a>
        </nav>
    </header>
    <main id="app">
        {content}
    </main>
    <footer class="app-footer">
        <p>Data: NASA Space Biology publications (PubMed Central)</p>
    </footer>
</body>
</html>"#
    )
}

/// Landing page.
#[must_use]
pub fn landing_page() -> String {
    html_shell(
        "Home",
        r#"<section class="hero">
    <h1>Explore six decades of space biology research</h1>
    <p>Search more than six hundred NASA-funded publications on how spaceflight affects
    humans, plants and cells, browse them by topic, or ask the research assistant.</p>
    <a class="btn btn-primary" href="/dashboard">Open the dashboard</a>
</section>"#,
    )
}

/// Dashboard page for one session.
#[must_use]
pub fn dashboard_page(state: &DashboardState, session_id: &str) -> String {
    let content = format!(
        r#"<div class="dashboard">
    <div class="column">
        {search}
        {results}
    </div>
    <aside class="column side">
        {chart}
        {chat}
    </aside>
</div>"#,
        search = card_with_header("search", "Search Publications", &search_form(state, session_id)),
        results = results_panel(state, false),
        chart = card_with_header("chart", "Publications by Topic", &topic_chart(&state.topics)),
        chat = chat_widget(state, session_id),
    );
    html_shell("Dashboard", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TopicCount;

    #[test]
    fn test_shell_escapes_title() {
        let html = html_shell("<x>", "body");
        assert!(html.contains("<title>&lt;x&gt; - BioCosmos Explorer</title>"));
        assert!(html.contains("htmx.org"));
    }

    #[test]
    fn test_dashboard_page_sections() {
        let state = DashboardState {
            topics: vec![TopicCount { name: "Plants".into(), count: 48 }],
            ..Default::default()
        };
        let html = dashboard_page(&state, "sid-1");
        assert!(html.contains(r#"id="results-panel""#));
        assert!(html.contains(r#"id="chat-widget""#));
        assert!(html.contains("<svg"));
        assert!(html.contains(r#"value="sid-1""#));
        assert!(html.contains("Plants (48)"));
    }

    #[test]
    fn test_landing_links_dashboard() {
        assert!(landing_page().contains(r#"href="/dashboard""#));
    }
}
