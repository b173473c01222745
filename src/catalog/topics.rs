//! Keyword-based topic categorisation.

/// Label for publications matching no topic keyword.
pub const OTHER_TOPIC: &str = "Other";

/// Topics in match-priority order with their title keywords.
pub const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Human Health",
        &["bone", "muscle", "cardiovascular", "immune", "health", "skeletal", "cardiac", "blood"],
    ),
    (
        "Plants",
        &["plant", "arabidopsis", "growth", "photosynthesis", "seed", "root", "leaf"],
    ),
    (
        "Radiation",
        &["radiation", "dna damage", "cosmic rays", "ionizing", "radioprotection"],
    ),
    (
        "Microgravity",
        &["microgravity", "weightlessness", "gravity", "spaceflight", "simulated microgravity"],
    ),
    (
        "Cell Biology",
        &["cell", "cellular", "protein", "gene", "expression", "signaling"],
    ),
    (
        "Development",
        &["development", "embryo", "differentiation", "morphology"],
    ),
    (
        "Metabolism",
        &["metabolism", "metabolic", "nutrient", "oxidative"],
    ),
];

/// Assign a topic to a publication title.
///
/// The first topic with any keyword contained in the lowercased title wins.
#[must_use]
pub fn categorize(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(OTHER_TOPIC, |(topic, _)| *topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        // "bone" (Human Health) is checked before "microgravity".
        assert_eq!(categorize("Microgravity induces bone loss in mice"), "Human Health");
        assert_eq!(categorize("Arabidopsis root growth in space"), "Plants");
        assert_eq!(categorize("Simulated microgravity and yeast"), "Microgravity");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize("IONIZING Radiation Effects"), "Radiation");
    }

    #[test]
    fn test_fallback_other() {
        assert_eq!(categorize("A survey of spacecraft hygiene"), OTHER_TOPIC);
    }

    #[test]
    fn test_substring_semantics() {
        // "cell" is a substring of "cellulose".
        assert_eq!(categorize("Cellulose synthesis in orbit"), "Cell Biology");
    }
}
