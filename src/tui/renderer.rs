//! Terminal rendering for reports, rewrites and questions

use crossterm::style::{Color, Stylize};
use termimad::MadSkin;

use super::theme::Theme;
use crate::adapters::ModelFamily;
use crate::advisor::Question;
use crate::analysis::{AnalysisReport, ScoreBand};
use crate::optimization::OptimizationResult;

const BAR_WIDTH: usize = 20;

/// Terminal renderer with markdown and styled output
pub struct TerminalRenderer {
    theme: Theme,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        let theme = Theme::default();
        let skin = Self::build_skin(&theme);
        Self { theme, skin }
    }

    fn build_skin(theme: &Theme) -> MadSkin {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(to_termimad_color(theme.title));
        skin.bold.set_fg(to_termimad_color(Color::White));
        skin.italic.set_fg(to_termimad_color(Color::DarkYellow));
        skin.inline_code.set_fg(to_termimad_color(Color::Green));
        skin.code_block.set_fg(to_termimad_color(Color::Green));
        skin
    }

    /// Render the review shell banner
    pub fn render_banner(&self, version: &str, model: ModelFamily, level: &str, style: &str) {
        println!();
        println!("{}", "  Prompt Architect Review Mode".with(self.theme.title));
        println!("  {} {}", "v".with(self.theme.dim), version.with(self.theme.dim));
        println!(
            "  {} {}  {} {}  {} {}",
            "Model:".with(self.theme.dim),
            model.as_str().with(self.theme.stats),
            "Level:".with(self.theme.dim),
            level.with(self.theme.stats),
            "Style:".with(self.theme.dim),
            style.with(self.theme.stats),
        );
        println!(
            "  {}",
            "Type a prompt line to append it, /help for commands, /quit to exit".with(self.theme.dim)
        );
        println!();
    }

    /// Render the score bar, altitude and component checklist
    pub fn render_report(&self, report: &AnalysisReport) {
        let score = report.score();
        let color = self.theme.score(score);
        let filled = usize::from(score) * BAR_WIDTH / 100;

        println!();
        println!("  {}", "Analysis".with(self.theme.title));
        println!(
            "  {} {}{} {}",
            "Score:".with(self.theme.dim),
            "\u{2588}".repeat(filled).with(color),
            "\u{2591}".repeat(BAR_WIDTH - filled).with(self.theme.dim),
            format!("{}/100", score).with(color),
        );
        println!(
            "  {} {}  {} {}",
            "Altitude:".with(self.theme.dim),
            report.altitude().as_str().with(self.theme.altitude(report.altitude())),
            "Words:".with(self.theme.dim),
            report.word_count().to_string().with(self.theme.stats),
        );
        println!();

        for (key, state) in report.components().iter() {
            let (mark, mark_color) = if state.present {
                ("\u{2713}", self.theme.success)
            } else {
                ("\u{00b7}", self.theme.dim)
            };
            let detail = if state.matches.is_empty() {
                String::new()
            } else {
                format!("({})", state.matches.join(", "))
            };
            println!(
                "  {} {:<12} {}",
                mark.with(mark_color),
                key.as_str(),
                detail.with(self.theme.dim),
            );
        }
        println!();
    }

    /// Render a rewrite next to its source, then techniques and metrics
    pub fn render_result(&self, original: &str, result: &OptimizationResult) {
        println!();
        println!("  {}", "Original".with(self.theme.title));
        for line in original.lines() {
            println!("  {}", line.with(self.theme.dim));
        }
        println!();
        println!("  {}", "Optimized".with(self.theme.title));
        self.render_markdown(&result.optimized_text);
        println!();

        if result.techniques.is_empty() {
            self.render_info("No techniques applied");
        } else {
            println!("  {}", "Techniques:".with(self.theme.dim));
            for label in result.techniques.labels() {
                println!("    {} {}", "\u{2022}".with(self.theme.dim), label.with(self.theme.command));
            }
        }

        let metrics = &result.metrics;
        let efficiency_color = if metrics.efficiency >= 0 {
            self.theme.success
        } else {
            self.theme.moderate
        };
        println!(
            "\n  {} {} {} {} tokens {}",
            "\u{2022}".with(self.theme.dim),
            metrics.original_tokens.to_string().with(self.theme.stats),
            "->".with(self.theme.dim),
            metrics.optimized_tokens.to_string().with(self.theme.stats),
            format!("({}% efficiency)", metrics.efficiency).with(efficiency_color),
        );
        println!();
    }

    pub fn render_questions(&self, questions: &[Question]) {
        println!();
        println!("  {}", "Clarifying questions".with(self.theme.title));
        for question in questions {
            println!(
                "  {} {} {}",
                format!("[{}]", question.id).with(self.theme.command),
                question.label.as_str().with(self.theme.stats),
                question.question.as_str(),
            );
            println!("      {}", format!("e.g. {}", question.placeholder).with(self.theme.dim));
        }
        println!();
    }

    /// Render the live 1-10 score with its feedback band
    pub fn render_quick_score(&self, score: u8) {
        let band = ScoreBand::for_score(score);
        let color = self.theme.band(band);
        println!(
            "  {} {} {}",
            format!("{}/10", score).with(color),
            band.label().with(color),
            band.message().with(self.theme.dim),
        );
    }

    /// Render text through the markdown skin when it carries markdown
    pub fn render_markdown(&self, content: &str) {
        if has_markdown_elements(content) {
            self.skin.print_text(content);
        } else {
            for line in content.lines() {
                println!("  {}", line.with(self.theme.optimized));
            }
        }
    }

    pub fn render_system(&self, msg: &str) {
        println!("  {} {}", "\u{25b6}".with(self.theme.system), msg.with(self.theme.system));
    }

    pub fn render_error(&self, msg: &str) {
        println!("  {} {}", "\u{2717}".with(self.theme.error), msg.with(self.theme.error));
    }

    pub fn render_success(&self, msg: &str) {
        println!("  {} {}", "\u{2713}".with(self.theme.success), msg.with(self.theme.success));
    }

    pub fn render_info(&self, msg: &str) {
        println!("  {}", msg.with(self.theme.dim));
    }

    pub fn prompt_color(&self) -> Color {
        self.theme.prompt
    }

    pub fn command_color(&self) -> Color {
        self.theme.command
    }

    pub fn dim_color(&self) -> Color {
        self.theme.dim
    }

    pub fn stats_color(&self) -> Color {
        self.theme.stats
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if content has markdown elements worth rendering through the skin
fn has_markdown_elements(content: &str) -> bool {
    content.contains("```")
        || content.contains("## ")
        || content.contains("# ")
        || content.contains("**")
        || content.contains("| ")
        || content.contains("- [")
}

/// Convert crossterm Color to termimad color
fn to_termimad_color(color: Color) -> termimad::crossterm::style::Color {
    match color {
        Color::Black => termimad::crossterm::style::Color::Black,
        Color::DarkGrey => termimad::crossterm::style::Color::DarkGrey,
        Color::Red => termimad::crossterm::style::Color::Red,
        Color::DarkRed => termimad::crossterm::style::Color::DarkRed,
        Color::Green => termimad::crossterm::style::Color::Green,
        Color::DarkGreen => termimad::crossterm::style::Color::DarkGreen,
        Color::Yellow => termimad::crossterm::style::Color::Yellow,
        Color::DarkYellow => termimad::crossterm::style::Color::DarkYellow,
        Color::Blue => termimad::crossterm::style::Color::Blue,
        Color::DarkBlue => termimad::crossterm::style::Color::DarkBlue,
        Color::Magenta => termimad::crossterm::style::Color::Magenta,
        Color::DarkMagenta => termimad::crossterm::style::Color::DarkMagenta,
        Color::Cyan => termimad::crossterm::style::Color::Cyan,
        Color::DarkCyan => termimad::crossterm::style::Color::DarkCyan,
        Color::White => termimad::crossterm::style::Color::White,
        Color::Grey => termimad::crossterm::style::Color::Grey,
        _ => termimad::crossterm::style::Color::Reset,
    }
}
