//! Interactive review shell
//!
//! Builds a prompt line by line, then loops through analyze, checklist
//! toggles and optimize until the rewrite looks right.

pub mod commands;
pub mod prompt;
pub mod renderer;
pub mod theme;

use crate::analysis::ComponentKey;
use crate::config::Config;
use crate::session::ReviewSession;

use anyhow::Result;
use commands::{parse_command, render_help, SlashCommand};
use crossterm::style::Stylize;
use prompt::PromptHandler;
use renderer::TerminalRenderer;

/// Slash-command driven front end for a [`ReviewSession`]
pub struct ReviewShell {
    session: ReviewSession,
    renderer: TerminalRenderer,
    prompt_handler: PromptHandler,
    /// Number of optimize runs this session
    optimize_count: usize,
}

impl ReviewShell {
    pub fn new(config: &Config) -> Result<Self> {
        let rules = config.rule_set()?;
        Ok(Self {
            session: ReviewSession::new(config, rules),
            renderer: TerminalRenderer::new(),
            prompt_handler: PromptHandler::new(),
            optimize_count: 0,
        })
    }

    /// Start with a prompt already loaded
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.session.set_prompt(prompt);
        self
    }

    /// Run the shell main loop
    pub fn run(&mut self) -> Result<()> {
        self.renderer.render_banner(
            env!("CARGO_PKG_VERSION"),
            self.session.model(),
            self.session.level().as_str(),
            self.session.style().as_str(),
        );

        loop {
            let input = match self
                .prompt_handler
                .read_line("prompt", self.renderer.prompt_color())
            {
                Some(input) => input,
                None => {
                    self.render_session_summary();
                    break;
                }
            };

            if input.trim().is_empty() {
                continue;
            }

            if input.trim_start().starts_with('/') {
                match parse_command(&input) {
                    Some(cmd) => {
                        if let CommandResult::Quit = self.handle_command(cmd) {
                            self.render_session_summary();
                            break;
                        }
                    }
                    None => self
                        .renderer
                        .render_error("Unknown command. Type /help for the list."),
                }
            } else {
                self.session.append_line(&input);
            }
        }

        Ok(())
    }

    fn handle_command(&mut self, cmd: SlashCommand) -> CommandResult {
        match cmd {
            SlashCommand::Help => render_help(&self.renderer),
            SlashCommand::Quit => return CommandResult::Quit,
            SlashCommand::Clear => {
                self.session.set_prompt("");
                self.renderer.render_success("Prompt cleared.");
            }
            SlashCommand::Prompt(Some(text)) => {
                self.session.set_prompt(text);
                self.renderer.render_success("Prompt replaced.");
            }
            SlashCommand::Prompt(None) => {
                if self.session.prompt().is_empty() {
                    self.renderer.render_info("No prompt yet. Type a line to start one.");
                } else {
                    self.renderer.render_markdown(self.session.prompt());
                }
            }
            SlashCommand::Analyze => match self.session.analyze() {
                Ok(report) => self.renderer.render_report(report),
                Err(e) => self.renderer.render_error(&e.to_string()),
            },
            SlashCommand::Toggle(None) => {
                let names: Vec<&str> = ComponentKey::ALL.iter().map(|k| k.as_str()).collect();
                self.renderer
                    .render_info(&format!("Components: {}", names.join(", ")));
            }
            SlashCommand::Toggle(Some(name)) => self.toggle(&name),
            SlashCommand::Optimize => {
                let original = self.session.prompt().to_string();
                match self.session.optimize() {
                    Ok(result) => {
                        self.optimize_count += 1;
                        self.renderer.render_result(&original, result);
                    }
                    Err(e) => self.renderer.render_error(&e.to_string()),
                }
            }
            SlashCommand::Model(Some(name)) => {
                let model = self.session.set_model(&name);
                self.renderer
                    .render_success(&format!("Target model set to: {}", model));
            }
            SlashCommand::Model(None) => self
                .renderer
                .render_info(&format!("Target model: {}", self.session.model())),
            SlashCommand::Level(Some(name)) => {
                let level = self.session.set_level(&name);
                self.renderer
                    .render_success(&format!("Optimization level set to: {}", level));
            }
            SlashCommand::Level(None) => self
                .renderer
                .render_info(&format!("Optimization level: {}", self.session.level())),
            SlashCommand::Style(Some(name)) => {
                let style = self.session.set_style(&name);
                self.renderer
                    .render_success(&format!("Output style set to: {}", style));
            }
            SlashCommand::Style(None) => self
                .renderer
                .render_info(&format!("Output style: {}", self.session.style())),
            SlashCommand::Questions => {
                let questions = self.session.questions();
                self.renderer.render_questions(&questions);
            }
            SlashCommand::Score => self.renderer.render_quick_score(self.session.quick_score()),
            SlashCommand::Status => self.render_status(),
        }
        CommandResult::Continue
    }

    fn toggle(&mut self, name: &str) {
        let key: ComponentKey = match name.parse() {
            Ok(key) => key,
            Err(e) => {
                self.renderer.render_error(&format!("{}", e));
                return;
            }
        };
        match self.session.toggle_component(key) {
            Ok(true) => self
                .renderer
                .render_success(&format!("{} marked present", key)),
            Ok(false) => self
                .renderer
                .render_success(&format!("{} marked absent", key)),
            Err(e) => self.renderer.render_error(&e.to_string()),
        }
    }

    fn render_status(&self) {
        let dim = self.renderer.dim_color();
        let stats = self.renderer.stats_color();

        println!();
        self.renderer.render_system("Current Status:");
        println!("  {} {}", "Model:".with(dim), self.session.model().as_str().with(stats));
        println!("  {} {}", "Level:".with(dim), self.session.level().as_str().with(stats));
        println!("  {} {}", "Style:".with(dim), self.session.style().as_str().with(stats));
        println!(
            "  {} {}",
            "Prompt words:".with(dim),
            self.session.prompt().split_whitespace().count().to_string().with(stats),
        );
        let analyzed = match self.session.report() {
            Some(report) => format!("{}/100", report.score()),
            None => "not analyzed".to_string(),
        };
        println!("  {} {}", "Analysis:".with(dim), analyzed.with(stats));
        println!();
    }

    fn render_session_summary(&self) {
        println!();
        self.renderer.render_system("Session Summary:");
        println!(
            "  {} lines entered, {} optimize runs",
            self.prompt_handler.history_len().to_string().with(self.renderer.stats_color()),
            self.optimize_count.to_string().with(self.renderer.stats_color()),
        );
        self.renderer.render_info("Goodbye!");
        println!();
    }
}

/// Result of handling a slash command
enum CommandResult {
    Continue,
    Quit,
}
