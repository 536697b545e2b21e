//! Color themes for the quiz screens

mod tokyo_night;

use ratatui::style::Color;

/// A color theme for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    // Surfaces
    pub bg_primary: Color,
    pub bg_panel: Color,

    // Text
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Options and hints
    pub option_selected: Color,
    pub hint: Color,
    pub worked_step: Color,

    // Outcomes
    pub correct: Color,
    pub incorrect: Color,
    pub warning: Color,

    pub border_focused: Color,
}

impl Theme {
    /// Find a built-in theme by name, falling back to Tokyo Night
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "tokyo night day" | "light" => tokyo_night::DAY,
            _ => tokyo_night::NIGHT,
        }
    }

    /// Color for a weakness average in [0, 2]
    pub fn weakness_color(&self, weakness_avg: f64) -> Color {
        if weakness_avg >= 1.5 {
            self.incorrect
        } else if weakness_avg >= 0.5 {
            self.warning
        } else {
            self.correct
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        tokyo_night::NIGHT
    }
}
