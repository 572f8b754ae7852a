//! Line input for the review shell

use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

/// Reads one line at a time behind a styled prompt, keeping a history
pub struct PromptHandler {
    history: Vec<String>,
}

impl PromptHandler {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    /// Display the prompt and read a line of input.
    /// Returns None on EOF (Ctrl+D).
    pub fn read_line(&mut self, label: &str, prompt_color: crossterm::style::Color) -> Option<String> {
        print!("{} ", format!("{}>", label).with(prompt_color));
        io::stdout().flush().ok()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
                if !trimmed.trim().is_empty() {
                    self.history.push(trimmed.clone());
                }
                Some(trimmed)
            }
            Err(_) => None,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for PromptHandler {
    fn default() -> Self {
        Self::new()
    }
}
