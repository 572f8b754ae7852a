//! Prompt Architect CLI - analyze, score and rewrite prompts for a target model

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use prompt_architect::{
    adapters::{adapter_for, ModelFamily},
    advisor::FollowUpAdvisor,
    analysis::{quick_score, AnalysisReport, ComponentKey, PromptAnalyzer, ScoreBand},
    compose::{Answers, ComposeFormat, ComposeOptions, PromptComposer},
    config::Config,
    optimization::{OptimizationConfig, OptimizationLevel, OutputStyle, PromptOptimizer},
    patterns::{PatternSet, RuleSet},
    tui::{renderer::TerminalRenderer, ReviewShell},
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "prompt-architect")]
#[command(about = "Analyze, score and rewrite LLM prompts for a target model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Config file (default: the user config directory)
    #[arg(long = "config-file", global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,
}

/// Prompt source: inline text, @file, or - for stdin
#[derive(Args)]
struct InputArgs {
    input: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a prompt and list the components it covers
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a prompt for a target model
    Optimize {
        #[command(flatten)]
        input: InputArgs,

        /// Target model (claude, gpt, gemini)
        #[arg(short, long)]
        model: Option<String>,

        /// Optimization level (low, medium, high)
        #[arg(short = 'L', long)]
        level: Option<String>,

        /// Output style (markdown, json, bullets, prose)
        #[arg(short, long)]
        style: Option<String>,

        /// Mark a component absent before rewriting
        #[arg(long, value_name = "COMPONENT")]
        disable: Vec<ComponentKey>,

        /// Mark a component present before rewriting
        #[arg(long, value_name = "COMPONENT")]
        enable: Vec<ComponentKey>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Output file for the rewritten prompt (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Suggest clarifying questions for a prompt
    Questions {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        json: bool,
    },

    /// Quick 1-10 score with feedback
    Score {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Compile answers to clarifying questions into a sectioned prompt
    Compose {
        #[command(flatten)]
        input: InputArgs,

        /// Answer to a question, as id=value (repeatable)
        #[arg(short, long, value_name = "ID=VALUE")]
        answer: Vec<String>,

        /// Target model (claude, gpt, gemini)
        #[arg(short, long)]
        model: Option<String>,

        /// Forbid preamble and filler in the answer
        #[arg(long)]
        no_yapping: bool,

        /// Ask for a concise answer
        #[arg(long)]
        keep_short: bool,

        /// Output format (standard, article, data, bullets)
        #[arg(short, long, default_value = "standard")]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive review mode
    Interactive {
        /// Prompt to start with (inline text, @file, or -)
        input: Option<String>,
    },

    /// Manage pattern tables
    #[command(subcommand)]
    Patterns(PatternsCommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum PatternsCommands {
    /// Write the active pattern tables as TOML
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export the built-in tables even if a pattern file is configured
        #[arg(long)]
        builtin: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize configuration file with defaults
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., defaults.model, analysis.min_prompt_chars)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config_file.unwrap_or_else(Config::default_path);

    match cli.command {
        Commands::Analyze { input, json } => {
            let config = Config::load_from(config_path)?;
            run_analyze(&config, &input.input, json)?;
        }
        Commands::Optimize {
            input,
            model,
            level,
            style,
            disable,
            enable,
            json,
            output,
        } => {
            let config = Config::load_from(config_path)?;
            let request = OptimizeRequest {
                model,
                level,
                style,
                disable,
                enable,
            };
            run_optimize(&config, &input.input, request, json, output)?;
        }
        Commands::Questions { input, json } => {
            run_questions(&input.input, json)?;
        }
        Commands::Score { input } => {
            run_score(&input.input)?;
        }
        Commands::Compose {
            input,
            answer,
            model,
            no_yapping,
            keep_short,
            format,
            output,
        } => {
            let config = Config::load_from(config_path)?;
            let model = model
                .map(|m| ModelFamily::from_name(&m))
                .unwrap_or(config.defaults.model);
            let options = ComposeOptions {
                no_yapping,
                keep_short,
                format: ComposeFormat::from_name(&format),
            };
            run_compose(&input.input, &answer, model, options, output)?;
        }
        Commands::Interactive { input } => {
            let config = Config::load_from(config_path)?;
            let mut shell = ReviewShell::new(&config)?;
            if let Some(input) = input {
                shell = shell.with_prompt(read_input(&input)?);
            }
            shell.run()?;
        }
        Commands::Patterns(PatternsCommands::Export { output, builtin }) => {
            let config = Config::load_from(config_path)?;
            run_patterns_export(&config, output, builtin)?;
        }
        Commands::Config(cmd) => {
            run_config_command(cmd, config_path)?;
        }
    }

    Ok(())
}

/// Resolve a prompt argument: `-` reads stdin, `@path` reads a file
fn read_input(input: &str) -> Result<String> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read prompt from stdin")?;
        buf
    } else if let Some(path) = input.strip_prefix('@') {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read prompt file {}", path))?
    } else {
        input.to_string()
    };

    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}

fn write_output(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Written to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn run_analyze(config: &Config, input: &str, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let rules = config.rule_set()?;
    let report = PromptAnalyzer::new(&rules).full_report(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        TerminalRenderer::new().render_report(&report);
    }

    Ok(())
}

/// CLI overrides on top of the configured defaults
struct OptimizeRequest {
    model: Option<String>,
    level: Option<String>,
    style: Option<String>,
    disable: Vec<ComponentKey>,
    enable: Vec<ComponentKey>,
}

impl OptimizeRequest {
    fn apply_overrides(&self, report: AnalysisReport) -> AnalysisReport {
        let report = self
            .enable
            .iter()
            .fold(report, |r, key| r.with_component_override(*key, true));
        self.disable
            .iter()
            .fold(report, |r, key| r.with_component_override(*key, false))
    }
}

fn run_optimize(
    config: &Config,
    input: &str,
    request: OptimizeRequest,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let text = read_input(input)?;
    let min_chars = config.analysis.min_prompt_chars;
    if text.trim().chars().count() < min_chars {
        bail!("Prompt is too short to optimize (need at least {} characters)", min_chars);
    }

    let model = request
        .model
        .as_deref()
        .map(ModelFamily::from_name)
        .unwrap_or(config.defaults.model);
    let optimization = OptimizationConfig {
        level: request
            .level
            .as_deref()
            .map(OptimizationLevel::from_name)
            .unwrap_or(config.defaults.level),
        style: request
            .style
            .as_deref()
            .map(OutputStyle::from_name)
            .unwrap_or(config.defaults.style),
    };
    debug!("Optimizing for {} at level {}", model, optimization.level);

    let rules = config.rule_set()?;
    let report = request.apply_overrides(PromptAnalyzer::new(&rules).full_report(&text));
    let result = PromptOptimizer::new(optimization, &rules).optimize(&text, &report, adapter_for(model));

    if json {
        let payload = serde_json::json!({
            "model": model,
            "level": optimization.level,
            "style": optimization.style,
            "analysis": report,
            "result": result,
        });
        write_output(&serde_json::to_string_pretty(&payload)?, output)?;
    } else if output.is_some() {
        write_output(&result.optimized_text, output)?;
    } else {
        TerminalRenderer::new().render_result(&text, &result);
    }

    Ok(())
}

fn run_questions(input: &str, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let questions = FollowUpAdvisor::suggest(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
    } else {
        TerminalRenderer::new().render_questions(&questions);
    }

    Ok(())
}

fn run_score(input: &str) -> Result<()> {
    let text = read_input(input)?;
    let score = quick_score(&text);
    debug!("Quick score {} ({:?})", score, ScoreBand::for_score(score));
    TerminalRenderer::new().render_quick_score(score);
    Ok(())
}

/// Parse repeated `id=value` answers
fn parse_answers(raw: &[String]) -> Result<Answers> {
    let mut answers = Answers::new();
    for entry in raw {
        let Some((id, value)) = entry.split_once('=') else {
            bail!("Invalid answer '{}'. Use: id=value (e.g., language=Rust)", entry);
        };
        answers.insert(id.trim().to_string(), value.trim().to_string());
    }
    Ok(answers)
}

fn run_compose(
    input: &str,
    raw_answers: &[String],
    model: ModelFamily,
    options: ComposeOptions,
    output: Option<PathBuf>,
) -> Result<()> {
    let text = read_input(input)?;
    let answers = parse_answers(raw_answers)?;
    let prompt = PromptComposer::new(options).compose(&text, &answers, model);
    write_output(&prompt, output)
}

fn run_patterns_export(config: &Config, output: Option<PathBuf>, builtin: bool) -> Result<()> {
    let set = match (&config.patterns.file, builtin) {
        (Some(path), false) => {
            let set = PatternSet::load_from(path)?;
            RuleSet::compile(&set)?;
            set
        }
        _ => PatternSet::default(),
    };

    match output {
        Some(path) => {
            set.save_to(&path)?;
            println!("Pattern tables written to: {}", path.display());
        }
        None => println!("{}", set.to_toml()?),
    }

    Ok(())
}

fn run_config_command(cmd: ConfigCommands, path: PathBuf) -> Result<()> {
    match cmd {
        ConfigCommands::Init { force } => {
            config_init(path, force)?;
        }
        ConfigCommands::Show => {
            config_show(path)?;
        }
        ConfigCommands::Set { key, value } => {
            config_set(path, &key, &value)?;
        }
        ConfigCommands::Path => {
            config_path(&path);
        }
        ConfigCommands::Validate => {
            config_validate(path)?;
        }
    }
    Ok(())
}

fn config_init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(path.clone())?;

    println!("Configuration file created at: {}", path.display());
    println!();
    println!("Environment variables override the file:");
    println!("  PROMPT_ARCHITECT_MODEL, PROMPT_ARCHITECT_LEVEL,");
    println!("  PROMPT_ARCHITECT_STYLE, PROMPT_ARCHITECT_PATTERNS");

    Ok(())
}

fn config_show(path: PathBuf) -> Result<()> {
    let config = Config::load_from(path)?;
    println!("{}", toml::to_string_pretty(&config)?);

    println!("--- Environment Variables ---");
    for var in [
        "PROMPT_ARCHITECT_MODEL",
        "PROMPT_ARCHITECT_LEVEL",
        "PROMPT_ARCHITECT_STYLE",
        "PROMPT_ARCHITECT_PATTERNS",
    ] {
        println!("{}: {}", var, std::env::var(var).unwrap_or_else(|_| "not set".to_string()));
    }

    Ok(())
}

fn config_set(path: PathBuf, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from(path.clone())?;

    let Some((section, field)) = key.split_once('.') else {
        println!("Invalid key format. Use: section.key (e.g., defaults.model)");
        return Ok(());
    };

    match (section, field) {
        ("defaults", "model") => config.defaults.model = value.parse()?,
        ("defaults", "level") => config.defaults.level = value.parse()?,
        ("defaults", "style") => config.defaults.style = value.parse()?,
        ("analysis", "min_prompt_chars") => config.analysis.min_prompt_chars = value.parse()?,
        ("patterns", "file") => {
            config.patterns.file = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        _ => {
            println!("Unknown key: {}", key);
            println!(
                "Available: defaults.model, defaults.level, defaults.style, \
                 analysis.min_prompt_chars, patterns.file"
            );
            return Ok(());
        }
    }

    config.validate()?;
    config.save_to(path)?;
    println!("Set {} = {}", key, value);

    Ok(())
}

fn config_path(path: &Path) {
    println!("{}", path.display());

    if path.exists() {
        println!("(file exists)");
    } else {
        println!("(file does not exist - run 'config init' to create)");
    }
}

fn config_validate(path: PathBuf) -> Result<()> {
    let config = Config::load_from(path)?;

    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid!");
            println!();
            println!("  Model: {}", config.defaults.model);
            println!("  Level: {}", config.defaults.level);
            println!("  Style: {}", config.defaults.style);
            println!("  Minimum prompt length: {} chars", config.analysis.min_prompt_chars);
            match &config.patterns.file {
                Some(file) => println!("  Patterns: {}", file.display()),
                None => println!("  Patterns: built-in"),
            }
        }
        Err(e) => {
            println!("Configuration validation failed:");
            println!("  {}", e);
        }
    }

    Ok(())
}
