//! End-to-end checks across analysis, rewriting and the review session

use prompt_architect::optimization::Technique;
use prompt_architect::{
    adapter_for, Altitude, ComponentKey, ConfigBuilder, FollowUpAdvisor, ModelFamily,
    OptimizationConfig, OptimizationLevel, OutputStyle, PatternSet, PromptAnalyzer,
    PromptOptimizer, ReviewSession, RuleSet, TokenEstimator,
};

const POEM: &str = "Act as an expert. Please help me write a poem.";

fn optimizer(level: OptimizationLevel) -> PromptOptimizer<'static> {
    PromptOptimizer::with_builtin_rules(OptimizationConfig {
        level,
        style: OutputStyle::Markdown,
    })
}

#[test]
fn test_claude_high_strips_filler_and_wraps_task() {
    let report = PromptAnalyzer::default().full_report(POEM);
    let result = optimizer(OptimizationLevel::High).optimize(
        POEM,
        &report,
        adapter_for(ModelFamily::Claude),
    );

    let text = &result.optimized_text;
    assert!(!text.to_lowercase().contains("please"));
    assert!(text.starts_with("<task>\n"));
    assert!(text.contains("\n</task>"));
    assert!(result.techniques.contains(Technique::SignalAmplification));
}

#[test]
fn test_short_prompt_is_elevated_at_medium() {
    let prompt = "Summarize this article for me.";
    let report = PromptAnalyzer::default().full_report(prompt);
    assert_eq!(report.altitude(), Altitude::TooHigh);

    let result = optimizer(OptimizationLevel::Medium).optimize(
        prompt,
        &report,
        adapter_for(ModelFamily::Gpt),
    );
    assert!(result.techniques.contains(Technique::AltitudeElevation));
    assert!(result.optimized_text.contains("ARCHITECTED MISSION:"));
    assert!(!result.optimized_text.contains("TASK:"));
}

#[test]
fn test_low_level_never_restructures() {
    let prompt = "Summarize this article for me.";
    let report = PromptAnalyzer::default().full_report(prompt);
    let result = optimizer(OptimizationLevel::Low).optimize(
        prompt,
        &report,
        adapter_for(ModelFamily::Generic),
    );

    assert!(!result.techniques.contains(Technique::AltitudeElevation));
    assert!(!result.optimized_text.contains("TASK:"));
}

#[test]
fn test_code_prompt_asks_for_stack_then_tools() {
    let questions = FollowUpAdvisor::suggest("Write a Python script that parses CSV files");
    let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();

    assert_eq!(&ids[..2], &["language", "library"]);
    assert!(questions.len() <= 3);
}

#[test]
fn test_format_override_suppresses_injection() {
    let prompt = "Act as a data analyst. Return the quarterly figures as json output \
                  with one entry per region and a short note on each trend.";
    let report = PromptAnalyzer::default().full_report(prompt);
    assert!(report.components().is_present(ComponentKey::Format));

    let overridden = report.with_component_override(ComponentKey::Format, false);
    let result = optimizer(OptimizationLevel::High).optimize(
        prompt,
        &overridden,
        adapter_for(ModelFamily::Gemini),
    );
    assert!(!result.techniques.has_format_injection());

    // the original report is untouched
    assert!(report.components().is_present(ComponentKey::Format));
}

#[test]
fn test_format_injected_when_marked_present_but_unnamed() {
    let prompt = "Explain how tides work to a curious ten year old reader.";
    let report = PromptAnalyzer::default()
        .full_report(prompt)
        .with_component_override(ComponentKey::Format, true);

    let result = PromptOptimizer::with_builtin_rules(OptimizationConfig {
        level: OptimizationLevel::Medium,
        style: OutputStyle::Bullets,
    })
    .optimize(prompt, &report, adapter_for(ModelFamily::Gpt));

    assert!(result
        .techniques
        .contains(Technique::FormatInjection(OutputStyle::Bullets)));
}

#[test]
fn test_score_bounds() {
    let analyzer = PromptAnalyzer::default();
    let long = "Act as a senior engineer. ".repeat(80);
    for text in ["", " ", "hi", POEM, long.as_str(), "<role>{x}</role>\n[a]\n_b_\nc\nd"] {
        let score = analyzer.calculate_score(text);
        assert!(score <= 100, "{} out of range for {:?}", score, text);
    }
    assert_eq!(analyzer.calculate_score(""), 0);
    assert_eq!(prompt_architect::quick_score(""), 0);
    assert!(prompt_architect::quick_score(&long) <= 10);
}

#[test]
fn test_detection_is_deterministic() {
    let analyzer = PromptAnalyzer::default();
    let text = "You are a tutor. Think step-by-step and use a friendly tone for beginners.";
    assert_eq!(analyzer.detector().detect(text), analyzer.detector().detect(text));
    assert_eq!(analyzer.full_report(text), analyzer.full_report(text));
}

#[test]
fn test_terse_prompt_is_too_high() {
    assert_eq!(PromptAnalyzer::default().altitude("Write code."), Altitude::TooHigh);
}

#[test]
fn test_redundancy_removal_settles() {
    let optimizer = optimizer(OptimizationLevel::Medium);
    let (once, changed) = optimizer.remove_redundancy("Can you please just help me fix this bug?");
    assert!(changed);

    let (twice, changed_again) = optimizer.remove_redundancy(&once);
    assert!(!changed_again);
    assert_eq!(twice, once);
}

#[test]
fn test_token_estimate_monotonic_per_band() {
    for family in ModelFamily::ALL {
        let mut last = 0;
        for len in 100..400 {
            let tokens = TokenEstimator::estimate(&"a".repeat(len), family);
            assert!(tokens >= last, "{} dropped at {} chars", family, len);
            last = tokens;
        }
    }
}

#[test]
fn test_session_uses_custom_pattern_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patterns.toml");

    let mut set = PatternSet::default();
    set.fillers.push("kindly ".to_string());
    set.save_to(&path).unwrap();

    let config = ConfigBuilder::new()
        .model(ModelFamily::Gpt)
        .pattern_file(&path)
        .build();
    config.validate().unwrap();

    let mut session = ReviewSession::new(&config, config.rule_set().unwrap());
    session.set_prompt("Kindly draft an onboarding checklist for new support staff.");
    session.analyze().unwrap();
    let result = session.optimize().unwrap();

    assert!(!result.optimized_text.to_lowercase().contains("kindly"));
    assert!(result.techniques.contains(Technique::SignalAmplification));
}

#[test]
fn test_builtin_rules_compile_from_defaults() {
    let compiled = RuleSet::compile(&PatternSet::default()).unwrap();
    assert_eq!(compiled.fallback_role(), RuleSet::builtin().fallback_role());
}
