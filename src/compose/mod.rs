//! Compile answered follow-up questions into a sectioned prompt
//!
//! Answers are keyed by [`Question`](crate::advisor::Question) id. Blank
//! answers count as unanswered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

use crate::adapters::ModelFamily;
use crate::optimization::UnknownOption;

/// Answers keyed by question id
pub type Answers = BTreeMap<String, String>;

/// Output shape the compiled prompt demands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeFormat {
    #[default]
    Standard,
    Article,
    Data,
    Bullets,
}

impl ComposeFormat {
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: UnknownOption| {
            warn!("{}, using standard", e);
            ComposeFormat::Standard
        })
    }

    fn description(&self) -> &'static str {
        match self {
            ComposeFormat::Standard => "Markdown",
            ComposeFormat::Article => "well-structured paragraphs with headings",
            ComposeFormat::Data => "raw JSON format",
            ComposeFormat::Bullets => "a clear bulleted list",
        }
    }
}

impl FromStr for ComposeFormat {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ComposeFormat::Standard),
            "article" => Ok(ComposeFormat::Article),
            "data" => Ok(ComposeFormat::Data),
            "bullets" => Ok(ComposeFormat::Bullets),
            _ => Err(UnknownOption {
                kind: "compose format",
                value: s.to_string(),
            }),
        }
    }
}

/// Toggles collected alongside the free-text answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    /// Forbid preamble and conversational filler
    pub no_yapping: bool,
    /// Ask for a concise answer
    pub keep_short: bool,
    pub format: ComposeFormat,
}

/// Builds the final sectioned prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer {
    options: ComposeOptions,
}

impl PromptComposer {
    pub fn new(options: ComposeOptions) -> Self {
        Self { options }
    }

    pub fn compose(&self, initial: &str, answers: &Answers, model: ModelFamily) -> String {
        let answer = |id: &str| {
            answers
                .get(id)
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
        };
        let format = self.options.format.description();

        let mut out = match (answer("tone"), answer("language")) {
            (Some(tone), _) => format!(
                "[ROLE]: You are an expert at communication with a {} tone.\n",
                tone
            ),
            (None, Some(language)) => format!(
                "[ROLE]: You are a Senior {} Engineer with 15+ years of experience.\n",
                language
            ),
            (None, None) => "[ROLE]: You are a Senior Expert Architect.\n".to_string(),
        };

        out.push_str(&format!("[TASK]: {}\n\n", initial));

        let context: Vec<String> = [
            ("recipient", "Target"),
            ("goal", "Main Priority"),
            ("style", "Style Guide"),
        ]
        .into_iter()
        .filter_map(|(id, label)| answer(id).map(|a| format!("- {}: {}", label, a)))
        .collect();
        if !context.is_empty() {
            out.push_str(&format!("[CONTEXT]:\n{}\n\n", context.join("\n")));
        }

        let mut hard: Vec<String> = Vec::new();
        if let Some(length) = answer("length") {
            hard.push(length.to_string());
        }
        if self.options.keep_short {
            hard.push("Be concise and avoid filler words.".to_string());
        }
        hard.push(format!("Output MUST be in {}.", format));
        let numbered: Vec<String> = hard
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{}. {}", i + 1, h))
            .collect();
        out.push_str(&format!("[HARD CONSTRAINTS]:\n{}\n", numbered.join("\n")));

        let mut never: Vec<String> = Vec::new();
        if let Some(negative) = answer("negative") {
            never.push(format!("- {}", negative));
        }
        if self.options.no_yapping {
            never.push(
                "- No preamble, no conversational filler, go straight to the answer.".to_string(),
            );
        }
        if !never.is_empty() {
            out.push_str(&format!("[NEVER]:\n{}\n", never.join("\n")));
        }

        out.push_str("\n[THINKING RULE]:\n");
        out.push_str(thinking_rule(model));

        out.push_str(&format!(
            "\n\n[OUTPUT]: Provide the result in {}. No preamble.",
            format
        ));
        out
    }
}

fn thinking_rule(model: ModelFamily) -> &'static str {
    match model {
        ModelFamily::Claude => {
            "Before providing the final output, analyze the logic in a <thinking> block, \
             identifying potential edge cases."
        }
        ModelFamily::Gpt => {
            "Think step-by-step. First draft the core logic, then review it for flaws, \
             then provide the final optimized output."
        }
        ModelFamily::Gemini => {
            "Strict Grounding: Use ONLY the context provided or implied by the core task. \
             If details are missing, state them rather than guessing."
        }
        ModelFamily::Generic => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> Answers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_minimal_prompt() {
        let out = PromptComposer::default().compose("Plan a trip", &Answers::new(), ModelFamily::Gpt);
        assert_eq!(
            out,
            "[ROLE]: You are a Senior Expert Architect.\n\
             [TASK]: Plan a trip\n\n\
             [HARD CONSTRAINTS]:\n1. Output MUST be in Markdown.\n\
             \n[THINKING RULE]:\n\
             Think step-by-step. First draft the core logic, then review it for flaws, \
             then provide the final optimized output.\
             \n\n[OUTPUT]: Provide the result in Markdown. No preamble."
        );
    }

    #[test]
    fn test_tone_beats_language_for_role() {
        let out = PromptComposer::default().compose(
            "Reply to the client",
            &answers(&[("tone", "warm"), ("language", "Rust")]),
            ModelFamily::Claude,
        );
        assert!(out.starts_with("[ROLE]: You are an expert at communication with a warm tone.\n"));

        let out = PromptComposer::default().compose(
            "Write a parser",
            &answers(&[("language", "Rust"), ("tone", "  ")]),
            ModelFamily::Claude,
        );
        assert!(out.starts_with("[ROLE]: You are a Senior Rust Engineer with 15+ years of experience.\n"));
    }

    #[test]
    fn test_all_sections() {
        let options = ComposeOptions {
            no_yapping: true,
            keep_short: true,
            format: ComposeFormat::Bullets,
        };
        let out = PromptComposer::new(options).compose(
            "Announce the launch",
            &answers(&[
                ("recipient", "existing customers"),
                ("goal", "drive upgrades"),
                ("length", "Under 200 words"),
                ("negative", "No discounts"),
            ]),
            ModelFamily::Gemini,
        );

        assert!(out.contains("[CONTEXT]:\n- Target: existing customers\n- Main Priority: drive upgrades\n\n"));
        assert!(out.contains(
            "[HARD CONSTRAINTS]:\n1. Under 200 words\n2. Be concise and avoid filler words.\n\
             3. Output MUST be in a clear bulleted list.\n"
        ));
        assert!(out.contains(
            "[NEVER]:\n- No discounts\n- No preamble, no conversational filler, go straight to the answer.\n"
        ));
        assert!(out.contains("Strict Grounding"));
        assert!(out.ends_with("[OUTPUT]: Provide the result in a clear bulleted list. No preamble."));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ComposeFormat::from_name("DATA"), ComposeFormat::Data);
        assert_eq!(ComposeFormat::from_name("poster"), ComposeFormat::Standard);
    }
}
