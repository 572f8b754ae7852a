//! Quality scoring and altitude classification

use tracing::debug;

use super::{word_count, Altitude, AnalysisReport, ComponentDetector, ComponentResult};
use crate::patterns::RuleSet;
use crate::tokens::round_half_up;

/// Share of the score earned by component coverage
const COMPONENT_WEIGHT: f64 = 60.0;
const STRUCTURE_BONUS: f64 = 10.0;
const SEMANTIC_DELIMITERS: &[char] = &['[', ']', '<', '>', '{', '}', '_'];

/// Prompts shorter than this (in chars) are presumed vague
const MIN_GROUNDED_CHARS: usize = 50;
/// Low markers must outnumber high markers by more than this
const LOW_ALTITUDE_MARGIN: usize = 2;

/// Produces [`AnalysisReport`]s
#[derive(Debug, Clone, Copy)]
pub struct PromptAnalyzer<'a> {
    rules: &'a RuleSet,
    detector: ComponentDetector<'a>,
}

impl Default for PromptAnalyzer<'static> {
    fn default() -> Self {
        Self::new(RuleSet::builtin())
    }
}

impl<'a> PromptAnalyzer<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            detector: ComponentDetector::new(rules),
        }
    }

    pub fn detector(&self) -> &ComponentDetector<'a> {
        &self.detector
    }

    /// 0-100 quality score
    pub fn calculate_score(&self, text: &str) -> u8 {
        score(&self.detector.detect(text), text)
    }

    pub fn altitude(&self, text: &str) -> Altitude {
        if text.chars().count() < MIN_GROUNDED_CHARS {
            return Altitude::TooHigh;
        }

        let low = self.rules.count_low_markers(text);
        let high = self.rules.count_high_markers(text);
        debug!("Altitude markers: {} low, {} high", low, high);

        if low > high + LOW_ALTITUDE_MARGIN {
            Altitude::TooLow
        } else {
            Altitude::JustRight
        }
    }

    /// Run detection, scoring and altitude classification together
    pub fn full_report(&self, text: &str) -> AnalysisReport {
        let components = self.detector.detect(text);
        let report = AnalysisReport::new(
            score(&components, text),
            self.altitude(text),
            components,
            word_count(text),
        );
        debug!(
            "Analyzed prompt: score {}, altitude {}, {} words",
            report.score(),
            report.altitude(),
            report.word_count()
        );
        report
    }
}

fn score(components: &ComponentResult, text: &str) -> u8 {
    let total = components.len().max(1) as f64;
    let mut score = components.present_count() as f64 / total * COMPONENT_WEIGHT;

    let lines = text.lines().filter(|line| !line.trim().is_empty()).count();
    let words = word_count(text);

    if lines > 3 {
        score += STRUCTURE_BONUS;
    }
    if words > 50 {
        score += STRUCTURE_BONUS;
    }
    if words > 150 {
        score += STRUCTURE_BONUS;
    }
    if text.contains(SEMANTIC_DELIMITERS) {
        score += STRUCTURE_BONUS;
    }

    round_half_up(score).clamp(0, 100) as u8
}
