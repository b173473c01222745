//! Button classes shared by the dashboard forms.

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Secondary action button.
    Secondary,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Secondary => "btn btn-secondary",
        }
    }
}

/// Render a submit button.
///
/// `label` is inserted verbatim so callers may pass markup such as an
/// indicator span.
#[must_use]
pub fn submit_button(label: &str, variant: ButtonVariant, disabled: bool) -> String {
    let disabled = if disabled { " disabled" } else { "" };
    format!(
        r#"<button type="submit" class="{}"{disabled}>{label}</button>"#,
        variant.classes()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_button() {
        let html = submit_button("Search", ButtonVariant::Primary, false);
        assert_eq!(
            html,
            r#"<button type="submit" class="btn btn-primary">Search</button>"#
        );
        assert!(submit_button("Ask", ButtonVariant::Secondary, true).contains(" disabled>"));
    }
}
