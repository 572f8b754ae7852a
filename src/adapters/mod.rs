//! Target-model adapters
//!
//! Each supported model family gets a final polishing pass that applies the
//! formatting conventions that family responds to best. Adapters are
//! stateless and selected through [`adapter_for`].

mod claude;
mod gemini;
mod gpt;

pub use claude::ClaudeAdapter;
pub use gemini::GeminiAdapter;
pub use gpt::GptAdapter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

use crate::analysis::AnalysisReport;

/// Model family a prompt is being tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    /// Anthropic Claude: structured-markup conventions
    #[default]
    Claude,
    /// OpenAI GPT: instruction-following conventions
    Gpt,
    /// Google Gemini: grounding-sensitive conventions
    Gemini,
    /// Unrecognized model name; no family-specific polish
    Generic,
}

#[derive(Error, Debug)]
#[error("Unknown model family: {0} (expected claude, gpt or gemini)")]
pub struct UnknownModel(pub String);

impl ModelFamily {
    pub const ALL: [ModelFamily; 3] = [ModelFamily::Claude, ModelFamily::Gpt, ModelFamily::Gemini];

    /// Resolve a model name, degrading to [`ModelFamily::Generic`] when it is
    /// not recognized.
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(family) => family,
            Err(UnknownModel(name)) => {
                warn!("Unknown model '{}', using generic token ratio and no polish", name);
                ModelFamily::Generic
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Claude => "claude",
            ModelFamily::Gpt => "gpt",
            ModelFamily::Gemini => "gemini",
            ModelFamily::Generic => "generic",
        }
    }
}

impl FromStr for ModelFamily {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ModelFamily::Claude),
            "gpt" | "openai" | "chatgpt" => Ok(ModelFamily::Gpt),
            "gemini" | "google" => Ok(ModelFamily::Gemini),
            "generic" => Ok(ModelFamily::Generic),
            _ => Err(UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final, model-aware rewrite step
pub trait ModelAdapter: Send + Sync {
    /// Display name of the targeted model
    fn name(&self) -> &str;

    /// Family used for token estimation
    fn family(&self) -> ModelFamily;

    /// Apply the family's conventions to an already rewritten prompt
    fn optimize(&self, text: &str, report: &AnalysisReport) -> String;
}

/// Adapter used for unrecognized models; returns the text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughAdapter;

impl ModelAdapter for PassthroughAdapter {
    fn name(&self) -> &str {
        "Generic"
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Generic
    }

    fn optimize(&self, text: &str, _report: &AnalysisReport) -> String {
        text.to_string()
    }
}

static CLAUDE: ClaudeAdapter = ClaudeAdapter;
static GPT: GptAdapter = GptAdapter;
static GEMINI: GeminiAdapter = GeminiAdapter;
static PASSTHROUGH: PassthroughAdapter = PassthroughAdapter;

/// Look up the adapter for a model family
pub fn adapter_for(family: ModelFamily) -> &'static dyn ModelAdapter {
    match family {
        ModelFamily::Claude => &CLAUDE,
        ModelFamily::Gpt => &GPT,
        ModelFamily::Gemini => &GEMINI,
        ModelFamily::Generic => &PASSTHROUGH,
    }
}
