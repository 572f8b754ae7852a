//! Follow-up questions for clarifying a prompt
//!
//! The text is routed to one topic (first match wins), whose questions are
//! topped up with generic ones until three are available.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum questions returned per prompt
const MAX_QUESTIONS: usize = 3;

/// A clarifying question to put to the prompt's author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable id the answer is keyed by
    pub id: String,
    pub label: String,
    pub question: String,
    pub placeholder: String,
}

impl Question {
    fn new(id: &str, label: &str, question: &str, placeholder: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            question: question.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// Topics recognized in a prompt, in routing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Code,
    Correspondence,
    LongForm,
}

impl Topic {
    const ROUTING: [(Topic, &'static [&'static str]); 3] = [
        (Topic::Code, &["code", "script", "program", "app"]),
        (Topic::Correspondence, &["email", "letter", "message"]),
        (Topic::LongForm, &["write", "article", "blog", "summary"]),
    ];

    /// First topic with a keyword in `text`
    pub fn detect(text: &str) -> Option<Topic> {
        let lower = text.to_lowercase();
        Self::ROUTING
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
            .map(|(topic, _)| *topic)
    }

    fn questions(&self) -> Vec<Question> {
        match self {
            Topic::Code => vec![
                Question::new(
                    "language",
                    "Technical Stack",
                    "Which programming language or framework should be used?",
                    "e.g., Python 3.12, React, Vanilla JS...",
                ),
                Question::new(
                    "library",
                    "External Tools",
                    "Are there any specific libraries allowed (or forbidden)?",
                    "e.g., Use only standard library, or: use Pandas...",
                ),
            ],
            Topic::Correspondence => vec![
                Question::new(
                    "tone",
                    "Voice & Tone",
                    "How should the message sound?",
                    "e.g., Professional, friendly, apologetic, urgent...",
                ),
                Question::new(
                    "recipient",
                    "Target Audience",
                    "Who exactly is receiving this?",
                    "e.g., My boss, a customer who is angry, a close friend...",
                ),
            ],
            Topic::LongForm => vec![
                Question::new(
                    "length",
                    "Desired Length",
                    "What is the word count or structure requirement?",
                    "e.g., Under 300 words, 3 distinct paragraphs...",
                ),
                Question::new(
                    "style",
                    "Writing Style",
                    "Is there a specific person's style to mimic?",
                    "e.g., Like Hemingway, academic, or high-energy marketing...",
                ),
            ],
        }
    }
}

fn goal_question() -> Question {
    Question::new(
        "goal",
        "Primary Goal",
        "What is the single most important thing the AI must get right?",
        "e.g., Accuracy of facts, speed of code, or matching the tone...",
    )
}

fn negative_question() -> Question {
    Question::new(
        "negative",
        "Strict Boundary",
        "What should the AI specifically NOT do?",
        "e.g., No jargon, no preamble, don't mention competitors...",
    )
}

/// Proposes clarifying questions for a raw prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowUpAdvisor;

impl FollowUpAdvisor {
    /// Up to three questions: topic questions first, then generic ones
    pub fn suggest(text: &str) -> Vec<Question> {
        let topic = Topic::detect(text);
        debug!("Follow-up topic: {:?}", topic);

        let mut questions = topic.map(|t| t.questions()).unwrap_or_default();

        if questions.len() < 2 {
            questions.push(goal_question());
        }
        if questions.len() < 3 {
            questions.push(negative_question());
        }

        questions.truncate(MAX_QUESTIONS);
        questions
    }
}
