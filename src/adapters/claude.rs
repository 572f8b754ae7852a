//! Claude adapter: XML task tags and an explicit thinking block

use super::{ModelAdapter, ModelFamily};
use crate::analysis::AnalysisReport;

/// Reports scoring below this get a request for visible reasoning
const THINKING_SCORE_THRESHOLD: u8 = 80;

const THINKING_REQUEST: &str =
    "Analyze the request carefully in a <thinking> block before providing your final response.";

#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeAdapter;

impl ModelAdapter for ClaudeAdapter {
    fn name(&self) -> &str {
        "Claude 4.5"
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Claude
    }

    fn optimize(&self, text: &str, report: &AnalysisReport) -> String {
        let mut result = if !text.contains("<task>") && !text.contains("<context>") {
            format!("<task>\n{}\n</task>", text)
        } else {
            text.to_string()
        };

        if report.score() < THINKING_SCORE_THRESHOLD {
            result.push_str("\n\n");
            result.push_str(THINKING_REQUEST);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Altitude, ComponentResult};

    fn report(score: u8) -> AnalysisReport {
        AnalysisReport::new(score, Altitude::JustRight, ComponentResult::default(), 20)
    }

    #[test]
    fn test_wraps_untagged_text() {
        let out = ClaudeAdapter.optimize("Summarize the memo.", &report(90));
        assert_eq!(out, "<task>\nSummarize the memo.\n</task>");
    }

    #[test]
    fn test_keeps_existing_tags() {
        let text = "<context>Quarterly numbers</context> Summarize.";
        let out = ClaudeAdapter.optimize(text, &report(90));
        assert_eq!(out, text);
    }

    #[test]
    fn test_low_score_requests_thinking() {
        let out = ClaudeAdapter.optimize("Summarize.", &report(79));
        assert!(out.ends_with(THINKING_REQUEST));

        let out = ClaudeAdapter.optimize("Summarize.", &report(80));
        assert!(!out.contains("<thinking>"));
    }
}
