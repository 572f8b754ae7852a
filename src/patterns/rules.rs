//! Compiled pattern tables

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

use super::{PatternError, PatternSet, RoleArchetype};
use crate::analysis::ComponentKey;

/// Ready-to-match form of a [`PatternSet`]
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// One matcher per component, in [`ComponentKey::ALL`] order
    components: Vec<(ComponentKey, Regex)>,
    fillers: Vec<Regex>,
    low_markers: Option<Regex>,
    high_markers: Option<Regex>,
    roles: Vec<RoleArchetype>,
    fallback_role: String,
    /// Lowercased guard phrases per component
    injection_guards: Vec<(ComponentKey, Vec<String>)>,
}

fn compile(key: &str, pattern: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| PatternError::InvalidRegex {
            key: key.to_string(),
            source,
        })
}

/// Single alternation matching any of the literal phrases
fn phrase_matcher(key: &str, phrases: &[String]) -> Result<Option<Regex>, PatternError> {
    if phrases.is_empty() {
        return Ok(None);
    }
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    compile(key, &alternation).map(Some)
}

impl RuleSet {
    pub fn compile(set: &PatternSet) -> Result<Self, PatternError> {
        if let Some(unknown) = set
            .components
            .keys()
            .chain(set.injection_guards.keys())
            .find(|name| name.parse::<ComponentKey>().is_err())
        {
            return Err(PatternError::UnknownComponent(unknown.clone()));
        }

        let mut components = Vec::with_capacity(ComponentKey::ALL.len());
        for key in ComponentKey::ALL {
            let alternatives = set
                .components
                .get(key.as_str())
                .filter(|patterns| !patterns.is_empty())
                .ok_or_else(|| PatternError::MissingComponent(key.as_str().to_string()))?;
            let pattern = format!("(?:{})", alternatives.join("|"));
            components.push((key, compile(key.as_str(), &pattern)?));
        }

        let fillers = set
            .fillers
            .iter()
            .map(|phrase| compile("fillers", &regex::escape(phrase)))
            .collect::<Result<Vec<_>, _>>()?;

        let roles = set
            .roles
            .iter()
            .map(|archetype| RoleArchetype {
                role: archetype.role.clone(),
                keywords: archetype.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        let injection_guards = ComponentKey::ALL
            .into_iter()
            .filter_map(|key| {
                set.injection_guards.get(key.as_str()).map(|phrases| {
                    (key, phrases.iter().map(|p| p.to_lowercase()).collect())
                })
            })
            .collect();

        Ok(Self {
            components,
            fillers,
            low_markers: phrase_matcher("low_altitude_markers", &set.low_altitude_markers)?,
            high_markers: phrase_matcher("high_altitude_markers", &set.high_altitude_markers)?,
            roles,
            fallback_role: set.fallback_role.clone(),
            injection_guards,
        })
    }

    /// Shared rule set compiled from the built-in tables
    pub fn builtin() -> &'static RuleSet {
        static BUILTIN: OnceLock<RuleSet> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            RuleSet::compile(&PatternSet::default()).expect("built-in pattern tables compile")
        })
    }

    pub(crate) fn components(&self) -> impl Iterator<Item = (ComponentKey, &Regex)> {
        self.components.iter().map(|(key, regex)| (*key, regex))
    }

    pub(crate) fn fillers(&self) -> &[Regex] {
        &self.fillers
    }

    /// Occurrences of over-prescriptive phrasing
    pub fn count_low_markers(&self, text: &str) -> usize {
        count_matches(self.low_markers.as_ref(), text)
    }

    /// Occurrences of vague phrasing
    pub fn count_high_markers(&self, text: &str) -> usize {
        count_matches(self.high_markers.as_ref(), text)
    }

    pub fn roles(&self) -> &[RoleArchetype] {
        &self.roles
    }

    pub fn fallback_role(&self) -> &str {
        &self.fallback_role
    }

    /// Whether `text` already spells out `key` in its own words. Components
    /// without guard phrases are never considered spelled out.
    pub fn is_spelled_out(&self, key: ComponentKey, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.injection_guards
            .iter()
            .find(|(k, _)| *k == key)
            .is_some_and(|(_, phrases)| phrases.iter().any(|p| lower.contains(p.as_str())))
    }
}

fn count_matches(regex: Option<&Regex>, text: &str) -> usize {
    regex.map_or(0, |r| r.find_iter(text).count())
}
