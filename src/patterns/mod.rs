//! Pattern tables driving detection, scoring and rewriting
//!
//! All keyword and regex tables live here as plain data so they can be
//! swapped out (loaded from a TOML file) without touching pipeline code.
//! [`RuleSet`] is the compiled, ready-to-match form.

mod rules;

pub use rules::RuleSet;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::analysis::ComponentKey;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern for {key}: {source}")]
    InvalidRegex {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("No patterns given for component: {0}")]
    MissingComponent(String),

    #[error("Unknown component in pattern table: {0}")]
    UnknownComponent(String),

    #[error("Failed to read pattern file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse pattern file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize pattern table: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// A role archetype used for expert-role inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleArchetype {
    /// Label injected into the rewritten prompt
    pub role: String,
    /// Substrings that vote for this role
    pub keywords: Vec<String>,
}

impl RoleArchetype {
    fn new(role: &str, keywords: &[&str]) -> Self {
        Self {
            role: role.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Declarative pattern tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSet {
    /// Regex alternatives per component name, matched case-insensitively
    pub components: BTreeMap<String, Vec<String>>,

    /// Filler phrases stripped during redundancy removal, in order
    pub fillers: Vec<String>,

    /// Phrases signalling an over-prescriptive prompt
    pub low_altitude_markers: Vec<String>,

    /// Phrases signalling a vague prompt
    pub high_altitude_markers: Vec<String>,

    /// Role catalog in priority order (earlier wins ties)
    pub roles: Vec<RoleArchetype>,

    /// Role used when no archetype keyword is present
    pub fallback_role: String,

    /// Per injectable component, phrases whose presence in the prompt means
    /// the component is already written out and needs no injected block
    pub injection_guards: BTreeMap<String, Vec<String>>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_component_patterns(key: ComponentKey) -> Vec<String> {
    match key {
        ComponentKey::Role => strings(&[
            "act as", "you are", "senior", "expert", "role", "persona", "identity",
        ]),
        ComponentKey::Task => strings(&[
            "task", "goal", "objective", "your mission", "write", "create", "analyze", "build",
            "develop",
        ]),
        ComponentKey::Context => strings(&[
            "context", "background", "situation", "the user is", "given that", "scenario",
        ]),
        ComponentKey::Constraints => strings(&[
            "constraint", "rule", "never", "always", "must", "should", "don't", "skip", "avoid",
        ]),
        ComponentKey::Examples => strings(&[
            "example", "few-shot", "sample", "instance", "here's how", "reference",
        ]),
        ComponentKey::Format => strings(&[
            "format", "output", "markdown", "json", "xml", "structure", "style guide",
        ]),
        ComponentKey::Thinking => strings(&[
            "think step-by-step", "reasoning", "thinking", "chain of thought", "<thinking>",
        ]),
        ComponentKey::Tone => strings(&[
            "tone", "voice", "style", "personality", "audience", "friendly", "professional",
        ]),
        ComponentKey::Variables => strings(&[r"\{\{.*?\}\}", r"\[.*?\]", r"<.*?>"]),
        ComponentKey::Audience => strings(&[
            "target audience", "users", "readers", "customers", "demographic",
        ]),
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            components: ComponentKey::ALL
                .iter()
                .map(|key| (key.as_str().to_string(), default_component_patterns(*key)))
                .collect(),
            fillers: strings(&[
                "please ",
                "i want you to ",
                "can you ",
                "i need help with ",
                "write a ",
                "help me ",
                "basically ",
                "just ",
            ]),
            low_altitude_markers: strings(&["step by step", "detailed", "every", "exactly", "how to"]),
            high_altitude_markers: strings(&["be helpful", "do your best", "summarize", "write"]),
            roles: vec![
                RoleArchetype::new(
                    "Senior Software Engineer",
                    &["code", "app", "bug", "react", "function", "develop", "script", "python", "javascript"],
                ),
                RoleArchetype::new(
                    "Conversion-Focused Marketing Strategist",
                    &["marketing", "landing page", "sales", "ad", "conversion", "campaign", "brand"],
                ),
                RoleArchetype::new(
                    "Senior Copywriter & Communications Expert",
                    &["write", "email", "blog", "article", "prose", "letter", "tone"],
                ),
                RoleArchetype::new(
                    "Data Science & Analysis Specialist",
                    &["data", "analyze", "science", "spreadsheet", "graph", "json", "csv", "sql"],
                ),
                RoleArchetype::new(
                    "Strategic Legal & Compliance Consultant",
                    &["legal", "contract", "terms", "privacy", "agreement", "clause"],
                ),
                RoleArchetype::new(
                    "Full-Stack UI/UX Designer",
                    &["pretty", "beautiful", "ui", "ux", "design", "layout", "graphic", "visual"],
                ),
            ],
            fallback_role: "Senior Subject Matter Expert".to_string(),
            injection_guards: [
                (ComponentKey::Role, &["act as", "you are", "expert"][..]),
                (ComponentKey::Context, &["context"][..]),
                (ComponentKey::Thinking, &["think"][..]),
                (ComponentKey::Constraints, &["constraint"][..]),
                (ComponentKey::Format, &["format"][..]),
            ]
            .into_iter()
            .map(|(key, phrases)| (key.as_str().to_string(), strings(phrases)))
            .collect(),
        }
    }
}

impl PatternSet {
    /// Load a pattern table from a TOML file. Sections left out of the file
    /// keep their built-in defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the table as TOML
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), PatternError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, PatternError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
