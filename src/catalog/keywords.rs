//! Keyword extraction for natural-language search queries.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "what", "does", "do", "is", "are", "how", "why", "when", "where", "who", "the", "a", "an",
        "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "from", "about",
        "as", "into", "through", "during", "before", "after", "above", "below", "between",
        "under", "since", "can", "could", "would", "should", "may", "might", "will", "shall",
        "have", "has", "had", "been", "be", "being", "it", "its", "itself", "they", "them",
        "their", "this", "that", "these", "those", "i", "you", "he", "she", "we", "me", "him",
        "her", "us", "there",
    ]
    .into_iter()
    .collect()
});

/// Pull the meaningful words out of a query.
///
/// Lowercases, strips `? ! . ,`, and drops stop words and words of two
/// characters or fewer.
#[must_use]
pub fn extract_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .replace(['?', '!', '.', ','], "")
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_keywords() {
        assert_eq!(
            extract_keywords("What does microgravity do to bones?"),
            vec!["microgravity", "bones"]
        );
    }

    #[test]
    fn test_short_words_dropped() {
        assert_eq!(extract_keywords("T cells in mice"), vec!["cells", "mice"]);
    }

    #[test]
    fn test_only_stop_words() {
        assert!(extract_keywords("what is it?").is_empty());
    }
}
