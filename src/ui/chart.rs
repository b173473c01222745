//! Topic distribution bar chart.

use std::fmt::Write as _;

use crate::backend::TopicCount;
use crate::ui::html_escape;

/// Colour for topics outside the fixed palette.
pub const OTHER_COLOR: &str = "#6b7280";

const PALETTE: &[(&str, &str)] = &[
    ("Human Health", "#ef4444"),
    ("Microgravity", "#a855f7"),
    ("Plants", "#22c55e"),
    ("Cell Biology", "#3b82f6"),
    ("Radiation", "#eab308"),
    ("Development", "#ec4899"),
    ("Metabolism", "#f97316"),
    ("Other", OTHER_COLOR),
];

const BAR_HEIGHT: u32 = 28;
const BAR_GAP: u32 = 10;
const LABEL_WIDTH: u32 = 130;
const PLOT_WIDTH: u32 = 420;

/// Fixed colour for a topic name.
#[must_use]
pub fn topic_color(topic: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(name, _)| *name == topic)
        .map_or(OTHER_COLOR, |(_, color)| *color)
}

/// Share of `count` in `total`, as a percentage with one decimal.
fn percent(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    #[allow(clippy::cast_precision_loss)]
    let share = count as f64 * 100.0 / total as f64;
    format!("{share:.1}")
}

/// Render the topic aggregate as an inline SVG bar chart.
#[must_use]
pub fn topic_chart(topics: &[TopicCount]) -> String {
    if topics.is_empty() {
        return r#"<p class="muted">Topic distribution unavailable.</p>"#.to_string();
    }

    let max = topics.iter().map(|t| t.count).max().unwrap_or(0).max(1);
    let total: u64 = topics.iter().map(|t| t.count).sum();
    let rows = u32::try_from(topics.len()).unwrap_or(u32::MAX);
    let height = rows.saturating_mul(BAR_HEIGHT + BAR_GAP);
    let width = LABEL_WIDTH + PLOT_WIDTH + 60;

    let mut svg = format!(
        r#"<svg class="topic-chart" viewBox="0 0 {width} {height}" role="img" aria-label="Publications by topic">"#
    );
    for (row, topic) in (0u32..).zip(topics) {
        let y = row * (BAR_HEIGHT + BAR_GAP);
        let bar = u32::try_from(topic.count.saturating_mul(u64::from(PLOT_WIDTH)) / max)
            .unwrap_or(PLOT_WIDTH);
        let name = html_escape(&topic.name);
        let _ = write!(
            svg,
            r#"<g><title>{name}: {count} publications ({pct}%)</title><text x="0" y="{ty}" class="chart-label">{name}</text><rect x="{LABEL_WIDTH}" y="{y}" width="{bar}" height="{BAR_HEIGHT}" rx="4" fill="{color}"/><text x="{tx}" y="{ty}" class="chart-value">{count}</text></g>"#,
            count = topic.count,
            pct = percent(topic.count, total),
            ty = y + BAR_HEIGHT / 2 + 5,
            tx = LABEL_WIDTH + bar + 6,
            color = topic_color(&topic.name),
        );
    }
    svg.push_str("</svg>");
    svg
}
