//! Prompt Architect - analyze, score and rewrite LLM prompts
//!
//! This library inspects a free-form prompt, reports which structural
//! components it covers, and rewrites it for a chosen target model.
//!
//! ## Key Features
//!
//! - **Analysis**: Detect ten prompt components, score 0-100 and classify altitude
//! - **Rewriting**: Strip filler, inject missing structure, elevate vague tasks
//! - **Model Adapters**: Claude, GPT and Gemini specific polish and token ratios
//! - **Follow-up Questions**: Topic-routed clarifying questions
//! - **Prompt Compiler**: Turn collected answers into a sectioned prompt
//! - **Review Session**: Analyze, adjust the checklist, re-optimize

pub mod adapters;
pub mod advisor;
pub mod analysis;
pub mod compose;
pub mod config;
pub mod optimization;
pub mod patterns;
pub mod session;
pub mod tokens;
pub mod tui;

pub use adapters::{adapter_for, ModelAdapter, ModelFamily};
pub use advisor::{FollowUpAdvisor, Question};
pub use analysis::{
    quick_score, Altitude, AnalysisReport, ComponentDetector, ComponentKey, ComponentResult,
    PromptAnalyzer, ScoreBand,
};
pub use compose::{ComposeOptions, PromptComposer};
pub use config::{Config, ConfigBuilder, ConfigError};
pub use optimization::{
    OptimizationConfig, OptimizationLevel, OptimizationResult, OutputStyle, PromptOptimizer,
};
pub use patterns::{PatternError, PatternSet, RuleSet};
pub use session::{ReviewSession, SessionError};
pub use tokens::TokenEstimator;
