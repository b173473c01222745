//! Badge for topic labels and status tags.

use crate::ui::html_escape;

/// Render an outlined badge.
#[must_use]
pub fn badge(label: &str) -> String {
    format!(
        r#"<span class="badge badge-outline">{}</span>"#,
        html_escape(label)
    )
}

/// Render a badge filled with a fixed colour.
#[must_use]
pub fn colored_badge(label: &str, color: &str) -> String {
    format!(
        r#"<span class="badge" style="background-color: {color}">{}</span>"#,
        html_escape(label)
    )
}
