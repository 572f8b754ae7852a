//! GPT adapter: markdown heading and step-by-step verification

use super::{ModelAdapter, ModelFamily};
use crate::analysis::{Altitude, AnalysisReport};

const HEADING: &str = "### Task Overview";
const VERIFY_REQUEST: &str = "Reason step-by-step and verify your logic for accuracy.";

#[derive(Debug, Clone, Copy, Default)]
pub struct GptAdapter;

impl ModelAdapter for GptAdapter {
    fn name(&self) -> &str {
        "GPT-5"
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Gpt
    }

    fn optimize(&self, text: &str, report: &AnalysisReport) -> String {
        let mut result = if text.contains('#') {
            text.to_string()
        } else {
            format!("{}\n{}", HEADING, text)
        };

        if report.altitude() == Altitude::TooHigh {
            result.push_str("\n\n");
            result.push_str(VERIFY_REQUEST);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ComponentResult;

    fn report(altitude: Altitude) -> AnalysisReport {
        AnalysisReport::new(50, altitude, ComponentResult::default(), 12)
    }

    #[test]
    fn test_prepends_heading() {
        let out = GptAdapter.optimize("List the risks.", &report(Altitude::JustRight));
        assert_eq!(out, "### Task Overview\nList the risks.");
    }

    #[test]
    fn test_existing_heading_untouched() {
        let out = GptAdapter.optimize("# Risks\nList them.", &report(Altitude::TooLow));
        assert_eq!(out, "# Risks\nList them.");
    }

    #[test]
    fn test_vague_prompt_gets_verification() {
        let out = GptAdapter.optimize("List the risks.", &report(Altitude::TooHigh));
        assert!(out.ends_with(VERIFY_REQUEST));
    }
}
