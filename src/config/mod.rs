//! Configuration management for prompt-architect
//!
//! Supports configuration via:
//! 1. Config file (~/.config/prompt-architect/config.toml)
//! 2. Environment variables (PROMPT_ARCHITECT_MODEL, PROMPT_ARCHITECT_LEVEL, etc.)
//! 3. CLI arguments (override file/env settings)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::adapters::ModelFamily;
use crate::optimization::{OptimizationConfig, OptimizationLevel, OutputStyle};
use crate::patterns::{PatternError, PatternSet, RuleSet};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Pattern file not found: {0}")]
    PatternFileNotFound(PathBuf),

    #[error("Invalid pattern table: {0}")]
    Patterns(#[from] PatternError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults used when the CLI does not say otherwise
    pub defaults: DefaultSettings,

    /// Analysis settings
    pub analysis: AnalysisSettings,

    /// Pattern table settings
    pub patterns: PatternSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Target model family (claude, gpt, gemini)
    pub model: ModelFamily,

    /// Optimization level (low, medium, high)
    pub level: OptimizationLevel,

    /// Output style for format injection (markdown, json, bullets, prose)
    pub style: OutputStyle,
}

impl DefaultSettings {
    pub fn optimization(&self) -> OptimizationConfig {
        OptimizationConfig {
            level: self.level,
            style: self.style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Prompts shorter than this (trimmed, in chars) are not analyzed
    pub min_prompt_chars: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self { min_prompt_chars: 5 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSettings {
    /// TOML pattern table replacing the built-in English tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Get default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prompt-architect")
            .join("config.toml")
    }

    /// Load config from default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from specific path
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default().with_env_overrides());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config.with_env_overrides())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("PROMPT_ARCHITECT_MODEL") {
            self.defaults.model = ModelFamily::from_name(&model);
        }
        if let Ok(level) = std::env::var("PROMPT_ARCHITECT_LEVEL") {
            self.defaults.level = OptimizationLevel::from_name(&level);
        }
        if let Ok(style) = std::env::var("PROMPT_ARCHITECT_STYLE") {
            self.defaults.style = OutputStyle::from_name(&style);
        }
        if let Ok(path) = std::env::var("PROMPT_ARCHITECT_PATTERNS") {
            self.patterns.file = Some(PathBuf::from(path));
        }

        self
    }

    /// Save config to default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save config to specific path
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.min_prompt_chars == 0 {
            return Err(ConfigError::Invalid(
                "analysis.min_prompt_chars must be at least 1".to_string(),
            ));
        }

        if let Some(path) = &self.patterns.file {
            if !path.exists() {
                return Err(ConfigError::PatternFileNotFound(path.clone()));
            }
            RuleSet::compile(&PatternSet::load_from(path)?)?;
        }

        Ok(())
    }

    /// Compiled pattern tables: the configured file, or the built-in tables
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        match &self.patterns.file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::PatternFileNotFound(path.clone()));
                }
                Ok(RuleSet::compile(&PatternSet::load_from(path)?)?)
            }
            None => Ok(RuleSet::builtin().clone()),
        }
    }

    /// Generate example config content
    pub fn example() -> String {
        let example = Config::default();
        toml::to_string_pretty(&example).unwrap_or_default()
    }
}

/// Builder for creating Config programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn model(mut self, model: ModelFamily) -> Self {
        self.config.defaults.model = model;
        self
    }

    pub fn level(mut self, level: OptimizationLevel) -> Self {
        self.config.defaults.level = level;
        self
    }

    pub fn style(mut self, style: OutputStyle) -> Self {
        self.config.defaults.style = style;
        self
    }

    pub fn min_prompt_chars(mut self, chars: usize) -> Self {
        self.config.analysis.min_prompt_chars = chars;
        self
    }

    pub fn pattern_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.patterns.file = Some(path.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.model, ModelFamily::Claude);
        assert_eq!(config.defaults.level, OptimizationLevel::Medium);
        assert_eq!(config.defaults.style, OutputStyle::Markdown);
        assert_eq!(config.analysis.min_prompt_chars, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .model(ModelFamily::Gemini)
            .level(OptimizationLevel::High)
            .style(OutputStyle::Prose)
            .min_prompt_chars(12)
            .build();

        assert_eq!(config.defaults.model, ModelFamily::Gemini);
        assert_eq!(
            config.defaults.optimization(),
            OptimizationConfig {
                level: OptimizationLevel::High,
                style: OutputStyle::Prose,
            }
        );
        assert_eq!(config.analysis.min_prompt_chars, 12);
    }

    #[test]
    fn test_example_config() {
        let example = Config::example();
        assert!(example.contains("[defaults]"));
        assert!(example.contains("[analysis]"));
        assert!(example.contains("model = \"claude\""));
    }

    #[test]
    fn test_save_and_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ConfigBuilder::new()
            .model(ModelFamily::Gpt)
            .style(OutputStyle::Json)
            .build();
        config.save_to(path.clone()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[defaults]\nlevel = \"low\"\n").unwrap();
        assert_eq!(parsed.defaults.level, OptimizationLevel::Low);
        assert_eq!(parsed.defaults.model, ModelFamily::Claude);
        assert_eq!(parsed.analysis.min_prompt_chars, 5);
    }

    #[test]
    fn test_missing_pattern_file() {
        let config = ConfigBuilder::new()
            .pattern_file("/nonexistent/patterns.toml")
            .build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PatternFileNotFound(_))
        ));
        assert!(config.rule_set().is_err());
    }

    #[test]
    fn test_custom_pattern_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.toml");
        let mut set = PatternSet::default();
        set.fallback_role = "Generalist".to_string();
        set.save_to(&path).unwrap();

        let config = ConfigBuilder::new().pattern_file(&path).build();
        assert!(config.validate().is_ok());
        assert_eq!(config.rule_set().unwrap().fallback_role(), "Generalist");
    }

    #[test]
    fn test_zero_min_chars_is_invalid() {
        let config = ConfigBuilder::new().min_prompt_chars(0).build();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
