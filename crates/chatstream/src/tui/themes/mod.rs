//! Color palette for the chat UI
//!
//! The theme is a plain value owned by `App` and passed to every render
//! function.

use ratatui::style::Color;

pub mod definitions;

/// A complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    // Core colors
    pub bg_color: Color,
    pub title_color: Color,
    pub accent_color: Color,
    pub text_color: Color,
    pub dim_color: Color,

    // Status colors
    pub success_color: Color,
    pub warning_color: Color,
    pub error_color: Color,
    pub info_color: Color,
    pub processing_color: Color,

    // Message bubbles
    pub user_msg_color: Color,
    pub user_msg_bg_color: Color,
    pub assistant_msg_color: Color,
    pub assistant_msg_bg_color: Color,

    // Results panel
    pub card_border_color: Color,
    pub badge_bg_color: Color,
    pub badge_fg_color: Color,

    // Input
    pub input_border_color: Color,
    pub input_placeholder_color: Color,
    pub status_bar_bg_color: Color,

    pub logo_primary_color: Color,
    pub logo_secondary_color: Color,
}

impl Theme {
    /// Badge color for a similarity percentage
    pub fn similarity_color(&self, percent: u32) -> Color {
        match percent {
            80.. => self.success_color,
            60..=79 => self.warning_color,
            _ => self.dim_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        definitions::chatstream()
    }
}
