//! Prompt construction for research answers.

use crate::backend::Publication;
use crate::llm::Message;

/// Most studies ever included as context.
pub const MAX_CONTEXT_STUDIES: usize = 10;

/// Fixed system prompt for the research assistant.
pub const SYSTEM_PROMPT: &str = "You are a helpful space biology research assistant analyzing NASA publications. \
Provide clear, concise answers based on the research summaries provided. \
Cite study titles when relevant. Keep responses under 300 words.";

/// Render retrieved publications as numbered study blocks.
#[must_use]
pub fn format_context(studies: &[Publication]) -> String {
    studies
        .iter()
        .take(MAX_CONTEXT_STUDIES)
        .enumerate()
        .map(|(i, s)| {
            format!(
                "Study {}: {}\nSummary: {}\nTopic: {}",
                i + 1,
                s.title,
                s.summary,
                s.topic.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// User prompt combining the question with the study context.
#[must_use]
pub fn user_prompt(question: &str, studies: &[Publication]) -> String {
    format!(
        "Question: {question}\n\nRelevant Research from NASA Publications:\n\n{}\n\n\
         Based on these studies, please provide a clear and informative answer to the question.",
        format_context(studies)
    )
}

/// Full message list for a completion request.
#[must_use]
pub fn build_messages(question: &str, studies: &[Publication]) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(user_prompt(question, studies)),
    ]
}
