//! Pattern-based component detection

use super::{ComponentKey, ComponentResult, ComponentState};
use crate::patterns::RuleSet;

/// Classifies which prompt components a text exhibits
#[derive(Debug, Clone, Copy)]
pub struct ComponentDetector<'a> {
    rules: &'a RuleSet,
}

impl Default for ComponentDetector<'static> {
    fn default() -> Self {
        Self::new(RuleSet::builtin())
    }
}

impl<'a> ComponentDetector<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// A component is present iff its pattern matches at least once. A word
    /// may count toward several components.
    pub fn detect(&self, text: &str) -> ComponentResult {
        let mut result = ComponentResult::default();
        for (key, regex) in self.rules.components() {
            let matches: Vec<String> = regex
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect();
            result.insert(
                key,
                ComponentState {
                    present: !matches.is_empty(),
                    matches,
                },
            );
        }
        result
    }

    /// Whether a single component is exhibited by `text`
    pub fn detects(&self, text: &str, key: ComponentKey) -> bool {
        self.rules
            .components()
            .find(|(k, _)| *k == key)
            .is_some_and(|(_, regex)| regex.is_match(text))
    }
}
