//! Review session: analyze, adjust the component checklist, re-optimize
//!
//! A session owns the current prompt and its latest report. Checklist edits
//! replace the report with an overridden copy, so every optimize() sees the
//! reviewer's current choices and earlier results stay untouched.

use thiserror::Error;
use tracing::{debug, info};

use crate::adapters::{adapter_for, ModelFamily};
use crate::advisor::{FollowUpAdvisor, Question};
use crate::analysis::{quick_score, AnalysisReport, ComponentKey, PromptAnalyzer};
use crate::config::Config;
use crate::optimization::{
    OptimizationConfig, OptimizationLevel, OptimizationResult, OutputStyle, PromptOptimizer,
};
use crate::patterns::RuleSet;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Prompt is too short to analyze (need at least {min} characters)")]
    PromptTooShort { min: usize },

    #[error("No analysis yet; analyze the prompt first")]
    NotAnalyzed,
}

pub struct ReviewSession {
    rules: RuleSet,
    prompt: String,
    model: ModelFamily,
    optimization: OptimizationConfig,
    min_prompt_chars: usize,
    report: Option<AnalysisReport>,
    last_result: Option<OptimizationResult>,
}

impl ReviewSession {
    pub fn new(config: &Config, rules: RuleSet) -> Self {
        Self {
            rules,
            prompt: String::new(),
            model: config.defaults.model,
            optimization: config.defaults.optimization(),
            min_prompt_chars: config.analysis.min_prompt_chars,
            report: None,
            last_result: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt. Any previous analysis no longer applies.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
        self.report = None;
        self.last_result = None;
    }

    /// Append a line to the prompt, invalidating the analysis
    pub fn append_line(&mut self, line: &str) {
        let mut prompt = std::mem::take(&mut self.prompt);
        if !prompt.is_empty() {
            prompt.push('\n');
        }
        prompt.push_str(line);
        self.set_prompt(prompt);
    }

    pub fn model(&self) -> ModelFamily {
        self.model
    }

    pub fn set_model(&mut self, name: &str) -> ModelFamily {
        self.model = ModelFamily::from_name(name);
        self.model
    }

    pub fn level(&self) -> OptimizationLevel {
        self.optimization.level
    }

    pub fn set_level(&mut self, name: &str) -> OptimizationLevel {
        self.optimization.level = OptimizationLevel::from_name(name);
        self.optimization.level
    }

    pub fn style(&self) -> OutputStyle {
        self.optimization.style
    }

    pub fn set_style(&mut self, name: &str) -> OutputStyle {
        self.optimization.style = OutputStyle::from_name(name);
        self.optimization.style
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn last_result(&self) -> Option<&OptimizationResult> {
        self.last_result.as_ref()
    }

    /// Live 1-10 score of the current prompt
    pub fn quick_score(&self) -> u8 {
        quick_score(&self.prompt)
    }

    pub fn analyze(&mut self) -> Result<&AnalysisReport, SessionError> {
        if self.prompt.trim().chars().count() < self.min_prompt_chars {
            return Err(SessionError::PromptTooShort {
                min: self.min_prompt_chars,
            });
        }

        let report = PromptAnalyzer::new(&self.rules).full_report(&self.prompt);
        info!("Analysis complete: {}/100, {}", report.score(), report.altitude());
        self.last_result = None;
        Ok(&*self.report.insert(report))
    }

    /// Set a component's checklist state. Returns the new state.
    pub fn set_component(&mut self, key: ComponentKey, present: bool) -> Result<bool, SessionError> {
        let report = self.report.as_ref().ok_or(SessionError::NotAnalyzed)?;
        self.report = Some(report.with_component_override(key, present));
        debug!("Component {} marked {}", key, if present { "present" } else { "absent" });
        Ok(present)
    }

    /// Flip a component's checklist state. Returns the new state.
    pub fn toggle_component(&mut self, key: ComponentKey) -> Result<bool, SessionError> {
        let report = self.report.as_ref().ok_or(SessionError::NotAnalyzed)?;
        let present = !report.components().is_present(key);
        self.set_component(key, present)
    }

    pub fn optimize(&mut self) -> Result<&OptimizationResult, SessionError> {
        let report = self.report.as_ref().ok_or(SessionError::NotAnalyzed)?;
        let optimizer = PromptOptimizer::new(self.optimization, &self.rules);
        let result = optimizer.optimize(&self.prompt, report, adapter_for(self.model));
        info!(
            "Optimized for {}: {} techniques, {}% efficiency",
            self.model,
            result.techniques.len(),
            result.metrics.efficiency
        );
        Ok(&*self.last_result.insert(result))
    }

    pub fn questions(&self) -> Vec<Question> {
        FollowUpAdvisor::suggest(&self.prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::Technique;

    fn session() -> ReviewSession {
        ReviewSession::new(&Config::default(), RuleSet::builtin().clone())
    }

    #[test]
    fn test_short_prompt_is_rejected() {
        let mut session = session();
        session.set_prompt("  hi  ");
        assert_eq!(session.analyze().unwrap_err(), SessionError::PromptTooShort { min: 5 });
    }

    #[test]
    fn test_optimize_requires_analysis() {
        let mut session = session();
        session.set_prompt("Summarize the attached report");
        assert_eq!(session.optimize().unwrap_err(), SessionError::NotAnalyzed);
        assert_eq!(
            session.toggle_component(ComponentKey::Role).unwrap_err(),
            SessionError::NotAnalyzed
        );
    }

    #[test]
    fn test_toggle_feeds_next_optimize() {
        let mut session = session();
        session.set_model("gpt");
        session.set_prompt("Summarize the attached quarterly report for the board members.");
        session.analyze().unwrap();
        assert!(!session.report().unwrap().components().is_present(ComponentKey::Format));

        let before = session.optimize().unwrap().clone();
        assert!(!before.techniques.has_format_injection());

        assert!(session.toggle_component(ComponentKey::Format).unwrap());
        let after = session.optimize().unwrap();
        assert!(after
            .techniques
            .contains(Technique::FormatInjection(OutputStyle::Markdown)));
        assert_ne!(after.optimized_text, before.optimized_text);
    }

    #[test]
    fn test_editing_prompt_invalidates_report() {
        let mut session = session();
        session.set_prompt("Draft a release note for version two");
        session.analyze().unwrap();
        session.append_line("Keep it under 100 words.");

        assert!(session.report().is_none());
        assert_eq!(
            session.prompt(),
            "Draft a release note for version two\nKeep it under 100 words."
        );
    }

    #[test]
    fn test_setters_degrade() {
        let mut session = session();
        assert_eq!(session.set_model("llama"), ModelFamily::Generic);
        assert_eq!(session.set_level("max"), OptimizationLevel::Medium);
        assert_eq!(session.set_style("Bullets"), OutputStyle::Bullets);
    }
}
