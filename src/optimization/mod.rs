//! Rule-driven prompt rewriting
//!
//! The optimizer strips filler, injects structure for components the
//! reviewer marked present, elevates vague prompts and finally hands the
//! text to the target model's adapter.

mod strategies;

pub use strategies::PromptOptimizer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// Which transformation passes run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    /// Filler removal and model polish only
    Low,
    #[default]
    Medium,
    High,
}

impl OptimizationLevel {
    /// Parse a level name, falling back to [`OptimizationLevel::Medium`]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: UnknownOption| {
            warn!("{}, using medium", e);
            OptimizationLevel::Medium
        })
    }

    /// Whether structural injection and altitude adjustment run
    pub fn restructures(&self) -> bool {
        !matches!(self, OptimizationLevel::Low)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationLevel::Low => "low",
            OptimizationLevel::Medium => "medium",
            OptimizationLevel::High => "high",
        }
    }
}

impl FromStr for OptimizationLevel {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(OptimizationLevel::Low),
            "medium" => Ok(OptimizationLevel::Medium),
            "high" => Ok(OptimizationLevel::High),
            _ => Err(UnknownOption {
                kind: "optimization level",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format requested from the target model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Markdown,
    Json,
    Bullets,
    Prose,
}

impl OutputStyle {
    /// Parse a style name, falling back to [`OutputStyle::Markdown`]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: UnknownOption| {
            warn!("{}, using markdown", e);
            OutputStyle::Markdown
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Markdown => "markdown",
            OutputStyle::Json => "json",
            OutputStyle::Bullets => "bullets",
            OutputStyle::Prose => "prose",
        }
    }

    /// Instruction block injected when the format component is missing
    pub fn format_template(&self) -> &'static str {
        match self {
            OutputStyle::Markdown => {
                "OUTPUT FORMAT:\nPresent the final response in [Markdown/JSON/Bullet Points]."
            }
            OutputStyle::Json => {
                "OUTPUT FORMAT:\nProvide the final output in valid RFC-8259 JSON format. \
                 Do not include markdown code blocks or preambles."
            }
            OutputStyle::Bullets => {
                "OUTPUT FORMAT:\nPresent the information as a clean, hierarchical list of bullet points."
            }
            OutputStyle::Prose => {
                "OUTPUT FORMAT:\nWrite in professional, flowing prose suitable for formal correspondence."
            }
        }
    }
}

impl FromStr for OutputStyle {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputStyle::Markdown),
            "json" => Ok(OutputStyle::Json),
            "bullets" | "bullet" => Ok(OutputStyle::Bullets),
            "prose" => Ok(OutputStyle::Prose),
            _ => Err(UnknownOption {
                kind: "output style",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one optimization run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    pub level: OptimizationLevel,
    pub style: OutputStyle,
}

/// A transformation pass that changed the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technique {
    SignalAmplification,
    ContextualRoleInference,
    ContextArchitecture,
    ChainOfThoughtInjection,
    ConstraintStructuring,
    FormatInjection(OutputStyle),
    AltitudeElevation,
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technique::SignalAmplification => f.write_str("Signal Amplification"),
            Technique::ContextualRoleInference => f.write_str("Contextual Role Inference"),
            Technique::ContextArchitecture => f.write_str("Context Architecture"),
            Technique::ChainOfThoughtInjection => f.write_str("Chain of Thought Injection"),
            Technique::ConstraintStructuring => f.write_str("Constraint Structuring"),
            Technique::FormatInjection(style) => write!(f, "Format Injection ({})", style),
            Technique::AltitudeElevation => f.write_str("Altitude Elevation"),
        }
    }
}

/// Append-only record of fired techniques, in firing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<String>")]
pub struct TechniqueLog(Vec<Technique>);

impl TechniqueLog {
    pub(crate) fn push(&mut self, technique: Technique) {
        self.0.push(technique);
    }

    pub fn contains(&self, technique: Technique) -> bool {
        self.0.contains(&technique)
    }

    /// Whether any format injection fired, whatever the style
    pub fn has_format_injection(&self) -> bool {
        self.0
            .iter()
            .any(|t| matches!(t, Technique::FormatInjection(_)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Technique> {
        self.0.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|t| t.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<TechniqueLog> for Vec<String> {
    fn from(log: TechniqueLog) -> Self {
        log.labels()
    }
}

/// Token estimates before and after rewriting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptimizationMetrics {
    pub original_tokens: usize,
    pub optimized_tokens: usize,
    /// Percentage reduction; negative when the prompt grew
    pub efficiency: i64,
}

/// Outcome of one optimize() call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationResult {
    pub optimized_text: String,
    pub techniques: TechniqueLog,
    pub metrics: OptimizationMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_parsing_degrades() {
        assert_eq!(OptimizationLevel::from_name("HIGH"), OptimizationLevel::High);
        assert_eq!(OptimizationLevel::from_name("extreme"), OptimizationLevel::Medium);
        assert_eq!(OutputStyle::from_name("bullets"), OutputStyle::Bullets);
        assert_eq!(OutputStyle::from_name("yaml"), OutputStyle::Markdown);
    }

    #[test]
    fn test_strict_parsing_errors() {
        let err = "yaml".parse::<OutputStyle>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown output style: yaml");
    }

    #[test]
    fn test_low_level_skips_restructuring() {
        assert!(!OptimizationLevel::Low.restructures());
        assert!(OptimizationLevel::Medium.restructures());
        assert!(OptimizationLevel::High.restructures());
    }

    #[test]
    fn test_each_style_has_its_own_template() {
        let templates: Vec<_> = [
            OutputStyle::Markdown,
            OutputStyle::Json,
            OutputStyle::Bullets,
            OutputStyle::Prose,
        ]
        .iter()
        .map(|s| s.format_template())
        .collect();

        for (i, a) in templates.iter().enumerate() {
            assert!(a.starts_with("OUTPUT FORMAT:\n"));
            for b in &templates[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_technique_labels() {
        let mut log = TechniqueLog::default();
        log.push(Technique::SignalAmplification);
        log.push(Technique::FormatInjection(OutputStyle::Json));

        assert_eq!(log.labels(), vec!["Signal Amplification", "Format Injection (json)"]);
        assert!(log.has_format_injection());
        assert_eq!(
            serde_json::to_value(&log).unwrap(),
            serde_json::json!(["Signal Amplification", "Format Injection (json)"])
        );
    }
}
