//! Optimization pass implementations

use tracing::debug;

use super::{
    OptimizationConfig, OptimizationMetrics, OptimizationResult, OutputStyle, Technique,
    TechniqueLog,
};
use crate::adapters::ModelAdapter;
use crate::analysis::{Altitude, AnalysisReport, ComponentKey};
use crate::patterns::RuleSet;
use crate::tokens::{efficiency, TokenEstimator};

const CONTEXT_TEMPLATE: &str =
    "CONTEXT: Provide background information and the specific situation requiring this task.";

const CONSTRAINTS_TEMPLATE: &str = "CONSTRAINTS: \n- Follow best practices.\n- Avoid generic or filler content.\n- [ADD SPECIFIC RULES HERE]";

const THINKING_TEMPLATE: &str = "Provide a detailed step-by-step reasoning process in a <thinking> section before the final response.";

const SECTION_SEPARATOR: &str = "\n\n---\n\n";
const TASK_LABEL: &str = "TASK:";
const ELEVATED_TASK_LABEL: &str = "ARCHITECTED MISSION:";

fn role_block(role: &str) -> String {
    format!("Act as a {} with deep knowledge in this domain.", role)
}

/// Rewrites prompts according to an analysis report
pub struct PromptOptimizer<'a> {
    config: OptimizationConfig,
    rules: &'a RuleSet,
}

impl PromptOptimizer<'static> {
    /// Optimizer backed by the built-in pattern tables
    pub fn with_builtin_rules(config: OptimizationConfig) -> Self {
        Self::new(config, RuleSet::builtin())
    }
}

impl<'a> PromptOptimizer<'a> {
    pub fn new(config: OptimizationConfig, rules: &'a RuleSet) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    /// Run the full pipeline. Deterministic for identical inputs, including
    /// the report's current component overrides.
    pub fn optimize(
        &self,
        prompt: &str,
        report: &AnalysisReport,
        adapter: &dyn ModelAdapter,
    ) -> OptimizationResult {
        let mut techniques = TechniqueLog::default();

        let (mut result, stripped) = self.remove_redundancy(prompt);
        if stripped {
            techniques.push(Technique::SignalAmplification);
        }

        if self.config.level.restructures() {
            result = self.inject_missing_structure(&result, report, &mut techniques);
            result = adjust_altitude(&result, report, &mut techniques);
        }

        result = adapter.optimize(&result, report);
        debug!("Applied {} polish", adapter.name());

        let family = adapter.family();
        let original_tokens = TokenEstimator::estimate(prompt, family);
        let optimized_tokens = TokenEstimator::estimate(&result, family);

        OptimizationResult {
            optimized_text: result,
            techniques,
            metrics: OptimizationMetrics {
                original_tokens,
                optimized_tokens,
                efficiency: efficiency(original_tokens, optimized_tokens),
            },
        }
    }

    /// Strip filler phrases and re-capitalize. Returns whether anything was
    /// removed.
    pub fn remove_redundancy(&self, text: &str) -> (String, bool) {
        let mut result = text.to_string();
        let mut found = false;

        for filler in self.rules.fillers() {
            if filler.is_match(&result) {
                result = filler.replace_all(&result, "").into_owned();
                found = true;
            }
        }

        if found {
            debug!("Stripped filler phrases");
        }

        (capitalize_first(&result), found)
    }

    /// Pick the role archetype with the most keyword hits. Ties keep the
    /// earlier archetype; no hits yields the fallback role.
    pub fn infer_role(&self, text: &str) -> &str {
        let lower = text.to_lowercase();
        let mut best = self.rules.fallback_role();
        let mut best_hits = 0;

        for archetype in self.rules.roles() {
            let hits = archetype
                .keywords
                .iter()
                .filter(|kw| lower.contains(kw.as_str()))
                .count();
            if hits > best_hits {
                best_hits = hits;
                best = &archetype.role;
            }
        }

        best
    }

    /// Add blocks for components marked present that the text does not
    /// already spell out, and label the task body.
    fn inject_missing_structure(
        &self,
        text: &str,
        report: &AnalysisReport,
        techniques: &mut TechniqueLog,
    ) -> String {
        let components = report.components();
        let wants = |key: ComponentKey| {
            components.is_present(key) && !self.rules.is_spelled_out(key, text)
        };

        let mut header: Vec<String> = Vec::new();
        let mut footer: Vec<String> = Vec::new();

        if wants(ComponentKey::Role) {
            let role = self.infer_role(text);
            debug!("Inferred role: {}", role);
            header.push(role_block(role));
            techniques.push(Technique::ContextualRoleInference);
        }

        if wants(ComponentKey::Context) {
            header.push(CONTEXT_TEMPLATE.to_string());
            techniques.push(Technique::ContextArchitecture);
        }

        if wants(ComponentKey::Thinking) {
            footer.push(THINKING_TEMPLATE.to_string());
            techniques.push(Technique::ChainOfThoughtInjection);
        }

        if wants(ComponentKey::Constraints) {
            footer.push(CONSTRAINTS_TEMPLATE.to_string());
            techniques.push(Technique::ConstraintStructuring);
        }

        if wants(ComponentKey::Format) {
            let style: OutputStyle = self.config.style;
            footer.push(style.format_template().to_string());
            techniques.push(Technique::FormatInjection(style));
        }

        let mut out = String::new();
        if !header.is_empty() {
            out.push_str(&header.join("\n\n"));
            out.push_str(SECTION_SEPARATOR);
        }
        out.push_str(TASK_LABEL);
        out.push(' ');
        out.push_str(text);
        if !footer.is_empty() {
            out.push_str(SECTION_SEPARATOR);
            out.push_str(&footer.join("\n\n"));
        }
        out
    }
}

fn adjust_altitude(text: &str, report: &AnalysisReport, techniques: &mut TechniqueLog) -> String {
    if report.altitude() != Altitude::TooHigh {
        return text.to_string();
    }
    techniques.push(Technique::AltitudeElevation);
    text.replacen(TASK_LABEL, ELEVATED_TASK_LABEL, 1)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{adapter_for, ModelFamily, PassthroughAdapter};
    use crate::analysis::{ComponentResult, PromptAnalyzer};
    use crate::optimization::OptimizationLevel;

    fn optimizer(level: OptimizationLevel, style: OutputStyle) -> PromptOptimizer<'static> {
        PromptOptimizer::with_builtin_rules(OptimizationConfig { level, style })
    }

    fn report_with(present: &[ComponentKey], altitude: Altitude) -> AnalysisReport {
        present.iter().fold(
            AnalysisReport::new(50, altitude, ComponentResult::default(), 30),
            |report, key| report.with_component_override(*key, true),
        )
    }

    #[test]
    fn test_remove_redundancy() {
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        let (text, found) = opt.remove_redundancy("please just fix the typo. PLEASE hurry");
        assert!(found);
        assert_eq!(text, "Fix the typo. hurry");
    }

    #[test]
    fn test_redundancy_removal_is_idempotent() {
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        let (once, _) = opt.remove_redundancy("Can you basically help me write a haiku?");
        let (twice, found) = opt.remove_redundancy(&once);
        assert_eq!(once, "Haiku?");
        assert_eq!(twice, once);
        assert!(!found);
    }

    #[test]
    fn test_role_inference() {
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        assert_eq!(opt.infer_role("Fix the bug in this python script"), "Senior Software Engineer");
        assert_eq!(
            opt.infer_role("Review the privacy clause in this contract"),
            "Strategic Legal & Compliance Consultant"
        );
        assert_eq!(opt.infer_role("Plan a picnic"), "Senior Subject Matter Expert");
    }

    #[test]
    fn test_role_inference_tie_keeps_first() {
        // "code" (engineer) vs "email" (copywriter): one hit each
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        assert_eq!(opt.infer_role("Email the code"), "Senior Software Engineer");
    }

    #[test]
    fn test_low_level_only_strips_and_polishes() {
        let opt = optimizer(OptimizationLevel::Low, OutputStyle::Markdown);
        let report = report_with(&[ComponentKey::Role, ComponentKey::Format], Altitude::TooHigh);
        let result = opt.optimize("please list three colors", &report, &PassthroughAdapter);

        assert_eq!(result.optimized_text, "List three colors");
        assert_eq!(result.techniques.labels(), vec!["Signal Amplification"]);
    }

    #[test]
    fn test_injection_layout_and_order() {
        let opt = optimizer(OptimizationLevel::High, OutputStyle::Json);
        let report = report_with(
            &[
                ComponentKey::Format,
                ComponentKey::Constraints,
                ComponentKey::Thinking,
                ComponentKey::Context,
                ComponentKey::Role,
            ],
            Altitude::JustRight,
        );
        let result = opt.optimize("Compare two sorting algorithms", &report, &PassthroughAdapter);

        let expected = format!(
            "Act as a Senior Subject Matter Expert with deep knowledge in this domain.\n\n{}\
             \n\n---\n\nTASK: Compare two sorting algorithms\n\n---\n\n{}\n\n{}\n\n{}",
            CONTEXT_TEMPLATE,
            THINKING_TEMPLATE,
            CONSTRAINTS_TEMPLATE,
            OutputStyle::Json.format_template()
        );
        assert_eq!(result.optimized_text, expected);
        assert_eq!(
            result.techniques.labels(),
            vec![
                "Contextual Role Inference",
                "Context Architecture",
                "Chain of Thought Injection",
                "Constraint Structuring",
                "Format Injection (json)",
            ]
        );
    }

    #[test]
    fn test_spelled_out_components_are_not_injected() {
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        let report = report_with(&[ComponentKey::Role, ComponentKey::Format], Altitude::JustRight);
        let result = opt.optimize(
            "You are a chef. Format the recipe as a table.",
            &report,
            &PassthroughAdapter,
        );

        assert_eq!(result.optimized_text, "TASK: You are a chef. Format the recipe as a table.");
        assert!(result.techniques.is_empty());
    }

    #[test]
    fn test_absent_components_are_not_injected() {
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        let report = report_with(&[], Altitude::JustRight);
        let result = opt.optimize("Compare two sorting algorithms", &report, &PassthroughAdapter);
        assert_eq!(result.optimized_text, "TASK: Compare two sorting algorithms");
    }

    #[test]
    fn test_altitude_elevation() {
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        let report = report_with(&[], Altitude::TooHigh);
        let result = opt.optimize("Name a planet", &report, &PassthroughAdapter);

        assert_eq!(result.optimized_text, "ARCHITECTED MISSION: Name a planet");
        assert!(result.techniques.contains(Technique::AltitudeElevation));
    }

    #[test]
    fn test_metrics_use_adapter_family() {
        let opt = optimizer(OptimizationLevel::Medium, OutputStyle::Markdown);
        let prompt = "Describe the water cycle for a class of ten-year-old students in about two paragraphs.";
        let report = PromptAnalyzer::default().full_report(prompt);
        let adapter = adapter_for(ModelFamily::Gemini);
        let result = opt.optimize(prompt, &report, adapter);

        assert_eq!(
            result.metrics.original_tokens,
            TokenEstimator::estimate(prompt, ModelFamily::Gemini)
        );
        assert_eq!(
            result.metrics.optimized_tokens,
            TokenEstimator::estimate(&result.optimized_text, ModelFamily::Gemini)
        );
        // task label and grounding reminder grow the prompt
        assert!(result.metrics.efficiency < 0);
    }

    #[test]
    fn test_empty_prompt() {
        let opt = optimizer(OptimizationLevel::Low, OutputStyle::Markdown);
        let result = opt.optimize("", &AnalysisReport::empty(), &PassthroughAdapter);
        assert_eq!(result.optimized_text, "");
        assert_eq!(result.metrics.efficiency, 0);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first(""), "");
    }
}
