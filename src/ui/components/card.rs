//! Card container with optional header.

/// Render a card around pre-rendered `body` markup.
#[must_use]
pub fn card(class: &str, body: &str) -> String {
    format!(r#"<div class="card {class}">{body}</div>"#)
}

/// Render a card with a title row above `body`.
#[must_use]
pub fn card_with_header(class: &str, title: &str, body: &str) -> String {
    card(
        class,
        &format!(
            r#"<div class="card-header"><h2>{}</h2></div><div class="card-content">{body}</div>"#,
            crate::ui::html_escape(title)
        ),
    )
}
