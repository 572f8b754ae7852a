//! Terminal theme and color definitions

use crossterm::style::Color;

use crate::analysis::{Altitude, ScoreBand};

/// Theme colors for reports and the review shell
pub struct Theme {
    /// Color for the shell prompt symbol
    pub prompt: Color,
    /// Color for rewritten prompt text
    pub optimized: Color,
    /// Color for system messages
    pub system: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for dim/secondary info
    pub dim: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for the banner and section titles
    pub title: Color,
    /// Color for numbers
    pub stats: Color,
    /// Color for slash command names
    pub command: Color,
    pub weak: Color,
    pub moderate: Color,
    pub strong: Color,
}

impl Theme {
    pub fn band(&self, band: ScoreBand) -> Color {
        match band {
            ScoreBand::Weak => self.weak,
            ScoreBand::Moderate => self.moderate,
            ScoreBand::Strong | ScoreBand::ProArchitect => self.strong,
        }
    }

    /// Color for a 0-100 analysis score
    pub fn score(&self, score: u8) -> Color {
        self.band(ScoreBand::for_score(score / 10))
    }

    pub fn altitude(&self, altitude: Altitude) -> Color {
        match altitude {
            Altitude::JustRight => self.strong,
            Altitude::TooLow | Altitude::TooHigh => self.moderate,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prompt: Color::Cyan,
            optimized: Color::White,
            system: Color::DarkYellow,
            error: Color::Red,
            dim: Color::DarkGrey,
            success: Color::Green,
            title: Color::Magenta,
            stats: Color::Blue,
            command: Color::Yellow,
            weak: Color::Red,
            moderate: Color::Yellow,
            strong: Color::Green,
        }
    }
}
