//! Server-rendered HTML for the dashboard.
//!
//! Pages are plain strings; interactivity comes from HTMX attributes that
//! post forms to `/dashboard/*` and swap the returned fragments in place.
//!
//! # Structure
//!
//! - [`pages`]: application shell, landing page and dashboard
//! - [`search`]: search form, topic selector, browse control
//! - [`results`]: result list panel
//! - [`chart`]: topic distribution chart and the topic colour map
//! - [`chat`]: research assistant widget
//! - [`components`]: badges, buttons, cards

pub mod chart;
pub mod chat;
pub mod components;
pub mod pages;
pub mod results;
pub mod search;

pub use chart::topic_color;

/// Escape text for inclusion in HTML content or attribute values.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}
