//! Slash command parsing and definitions

use crossterm::style::Stylize;

/// Available slash commands
#[derive(Debug, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Quit,
    /// Discard the current prompt
    Clear,
    /// Replace the prompt, or show it when no text is given
    Prompt(Option<String>),
    Analyze,
    /// Flip one checklist component
    Toggle(Option<String>),
    Optimize,
    Model(Option<String>),
    Level(Option<String>),
    Style(Option<String>),
    Questions,
    Score,
    Status,
}

/// Parse a slash command from user input.
/// Returns None if the input is not a slash command.
pub fn parse_command(input: &str) -> Option<SlashCommand> {
    let input = input.trim();
    if !input.starts_with('/') {
        return None;
    }

    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match cmd.to_lowercase().as_str() {
        "/help" | "/h" | "/?" => Some(SlashCommand::Help),
        "/quit" | "/q" | "/exit" => Some(SlashCommand::Quit),
        "/clear" | "/cls" => Some(SlashCommand::Clear),
        "/prompt" | "/p" => Some(SlashCommand::Prompt(arg)),
        "/analyze" | "/a" => Some(SlashCommand::Analyze),
        "/toggle" | "/t" => Some(SlashCommand::Toggle(arg)),
        "/optimize" | "/o" => Some(SlashCommand::Optimize),
        "/model" => Some(SlashCommand::Model(arg)),
        "/level" => Some(SlashCommand::Level(arg)),
        "/style" => Some(SlashCommand::Style(arg)),
        "/questions" | "/ask" => Some(SlashCommand::Questions),
        "/score" => Some(SlashCommand::Score),
        "/status" => Some(SlashCommand::Status),
        _ => None,
    }
}

/// Render help text for all slash commands
pub fn render_help(renderer: &super::renderer::TerminalRenderer) {
    let cmd_color = renderer.command_color();
    let dim_color = renderer.dim_color();

    println!();
    renderer.render_system("Available commands:");
    println!();

    let commands = [
        ("/help", "Show this help message"),
        ("/quit", "Exit review mode"),
        ("/clear", "Discard the current prompt"),
        ("/prompt [text]", "Replace the prompt, or show it"),
        ("/analyze", "Score the prompt and list its components"),
        ("/toggle <component>", "Flip a component on the checklist"),
        ("/optimize", "Rewrite the prompt using the checklist"),
        ("/model [name]", "Show or change the target model"),
        ("/level [name]", "Show or change the optimization level"),
        ("/style [name]", "Show or change the output style"),
        ("/questions", "Suggest clarifying questions"),
        ("/score", "Quick 1-10 score of the prompt"),
        ("/status", "Show the session settings"),
    ];

    for (cmd, desc) in &commands {
        println!("  {:<25} {}", cmd.with(cmd_color), desc.with(dim_color));
    }
    println!();
}
