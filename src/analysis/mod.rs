//! Prompt analysis: component detection, scoring and altitude
//!
//! A prompt is checked for ten semantic components a well-formed prompt is
//! expected to carry. Their density plus a few structural signals yields a
//! 0-100 score, and marker phrases classify how abstract the prompt is.

mod analyzer;
mod detector;
mod quick_score;

pub use analyzer::PromptAnalyzer;
pub use detector::ComponentDetector;
pub use quick_score::{quick_score, ScoreBand};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic building block of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKey {
    Role,
    Task,
    Context,
    Constraints,
    Examples,
    Format,
    Thinking,
    Tone,
    Variables,
    Audience,
}

#[derive(Error, Debug)]
#[error("Unknown component: {0}")]
pub struct UnknownComponent(pub String);

impl ComponentKey {
    pub const ALL: [ComponentKey; 10] = [
        ComponentKey::Role,
        ComponentKey::Task,
        ComponentKey::Context,
        ComponentKey::Constraints,
        ComponentKey::Examples,
        ComponentKey::Format,
        ComponentKey::Thinking,
        ComponentKey::Tone,
        ComponentKey::Variables,
        ComponentKey::Audience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKey::Role => "role",
            ComponentKey::Task => "task",
            ComponentKey::Context => "context",
            ComponentKey::Constraints => "constraints",
            ComponentKey::Examples => "examples",
            ComponentKey::Format => "format",
            ComponentKey::Thinking => "thinking",
            ComponentKey::Tone => "tone",
            ComponentKey::Variables => "variables",
            ComponentKey::Audience => "audience",
        }
    }
}

impl FromStr for ComponentKey {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ComponentKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| UnknownComponent(s.to_string()))
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detection outcome for a single component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentState {
    /// Whether the component counts as present; reviewers may override this
    pub present: bool,
    /// Matched substrings, in text order
    pub matches: Vec<String>,
}

/// Detection outcome for every component, keyed in [`ComponentKey::ALL`] order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentResult(BTreeMap<ComponentKey, ComponentState>);

impl Default for ComponentResult {
    fn default() -> Self {
        Self(
            ComponentKey::ALL
                .into_iter()
                .map(|key| (key, ComponentState::default()))
                .collect(),
        )
    }
}

impl ComponentResult {
    pub(crate) fn insert(&mut self, key: ComponentKey, state: ComponentState) {
        self.0.insert(key, state);
    }

    pub fn get(&self, key: ComponentKey) -> Option<&ComponentState> {
        self.0.get(&key)
    }

    pub fn is_present(&self, key: ComponentKey) -> bool {
        self.0.get(&key).is_some_and(|state| state.present)
    }

    pub fn present_count(&self) -> usize {
        self.0.values().filter(|state| state.present).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKey, &ComponentState)> {
        self.0.iter().map(|(key, state)| (*key, state))
    }

    fn set_present(&mut self, key: ComponentKey, present: bool) {
        self.0.entry(key).or_default().present = present;
    }
}

/// How abstract a prompt's framing is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Altitude {
    /// Overly prescriptive
    TooLow,
    JustRight,
    /// Vague or high-level
    TooHigh,
}

impl Altitude {
    pub fn as_str(&self) -> &'static str {
        match self {
            Altitude::TooLow => "too-low",
            Altitude::JustRight => "just-right",
            Altitude::TooHigh => "too-high",
        }
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing one prompt.
///
/// Immutable apart from component overrides, which produce a new report via
/// [`AnalysisReport::with_component_override`]. Overrides do not recompute
/// the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    score: u8,
    altitude: Altitude,
    components: ComponentResult,
    word_count: usize,
}

impl AnalysisReport {
    pub fn new(score: u8, altitude: Altitude, components: ComponentResult, word_count: usize) -> Self {
        Self {
            score: score.min(100),
            altitude,
            components,
            word_count,
        }
    }

    /// Report for empty input
    pub fn empty() -> Self {
        Self::new(0, Altitude::TooHigh, ComponentResult::default(), 0)
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn altitude(&self) -> Altitude {
        self.altitude
    }

    pub fn components(&self) -> &ComponentResult {
        &self.components
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Copy of this report with one component's `present` flag replaced
    pub fn with_component_override(&self, key: ComponentKey, present: bool) -> Self {
        let mut report = self.clone();
        report.components.set_present(key, present);
        report
    }

    /// Copy of this report with one component's `present` flag flipped
    pub fn with_component_toggled(&self, key: ComponentKey) -> Self {
        self.with_component_override(key, !self.components.is_present(key))
    }
}

/// Whitespace-delimited token count
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_key_parse() {
        assert_eq!("Format".parse::<ComponentKey>().unwrap(), ComponentKey::Format);
        assert!("formats".parse::<ComponentKey>().is_err());
    }

    #[test]
    fn test_override_leaves_original_untouched() {
        let report = AnalysisReport::empty();
        let overridden = report.with_component_override(ComponentKey::Format, true);

        assert!(overridden.components().is_present(ComponentKey::Format));
        assert!(!report.components().is_present(ComponentKey::Format));
        assert_eq!(overridden.score(), report.score());
    }

    #[test]
    fn test_toggle_flips() {
        let report = AnalysisReport::empty().with_component_toggled(ComponentKey::Role);
        assert!(report.components().is_present(ComponentKey::Role));
        let report = report.with_component_toggled(ComponentKey::Role);
        assert!(!report.components().is_present(ComponentKey::Role));
    }

    #[test]
    fn test_fixed_key_order() {
        let keys: Vec<_> = ComponentResult::default().iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ComponentKey::ALL.to_vec());
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(AnalysisReport::empty()).unwrap();
        assert_eq!(json["altitude"], "too-high");
        assert_eq!(json["components"]["constraints"]["present"], false);
        assert_eq!(json["word_count"], 0);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("  two\nwords "), 2);
    }
}
