//! Gemini adapter: grounding reminder and instruction delimiters

use super::{ModelAdapter, ModelFamily};
use crate::analysis::AnalysisReport;

const GROUNDING: &str =
    "Ensure strict grounding in the provided context. Do not hallucinate details.";

/// Prompts longer than this (in words) get explicit delimiters
const DELIMIT_WORD_THRESHOLD: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiAdapter;

impl ModelAdapter for GeminiAdapter {
    fn name(&self) -> &str {
        "Gemini 3"
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Gemini
    }

    fn optimize(&self, text: &str, report: &AnalysisReport) -> String {
        let mut result = text.to_string();

        let lower = text.to_lowercase();
        if !lower.contains("fact") && !lower.contains("source") {
            result.push_str("\n\n");
            result.push_str(GROUNDING);
        }

        if report.word_count() > DELIMIT_WORD_THRESHOLD {
            result = format!("[INSTRUCTIONS]\n{}\n[/INSTRUCTIONS]", result);
        }

        result
    }
}
