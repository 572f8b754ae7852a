//! Lightweight 1-10 score for live feedback while a prompt is typed

use serde::Serialize;

use super::word_count;
use crate::tokens::round_half_up;

const SPECIFIC_KEYWORDS: &[&str] = &[
    "format", "style", "avoid", "never", "must", "should", "json", "markdown", "code", "python",
    "javascript", "audience", "persona", "expert", "detailed", "brief",
];

const GOAL_MARKERS: &[&str] = &["write", "create", "explain", "analyze", "solve", "help", "act as"];

const STRUCTURE_MARKS: &[char] = &['[', ']', '(', ')', '-', '>', ':'];

/// Score a prompt from 0 (empty) to 10
pub fn quick_score(text: &str) -> u8 {
    if text.trim().is_empty() {
        return 0;
    }

    let lower = text.to_lowercase();
    let words = word_count(text);
    let mut score = 1.0;

    for threshold in [10, 30, 60] {
        if words > threshold {
            score += 1.0;
        }
    }

    let found = SPECIFIC_KEYWORDS.iter().filter(|kw| lower.contains(*kw)).count();
    score += (found as f64 / 2.0).min(4.0);

    if text.contains('\n') {
        score += 1.0;
    }
    if text.contains(STRUCTURE_MARKS) {
        score += 1.0;
    }

    if GOAL_MARKERS.iter().any(|g| lower.contains(g)) {
        score += 1.0;
    }

    round_half_up(score).min(10) as u8
}

/// Qualitative band for a quick score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Weak,
    Moderate,
    Strong,
    ProArchitect,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            0..=3 => ScoreBand::Weak,
            4..=6 => ScoreBand::Moderate,
            7..=8 => ScoreBand::Strong,
            _ => ScoreBand::ProArchitect,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Weak => "Weak (Vague)",
            ScoreBand::Moderate => "Moderate",
            ScoreBand::Strong => "Strong",
            ScoreBand::ProArchitect => "Pro Architect",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Weak => "Add more details about the task and format.",
            ScoreBand::Moderate => "Good, but could use more constraints.",
            ScoreBand::Strong => "Solid prompt! The optimizer will polish it further.",
            ScoreBand::ProArchitect => "Excellent specificity and structure.",
        }
    }
}
