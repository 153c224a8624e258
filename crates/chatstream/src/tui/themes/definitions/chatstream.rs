use super::super::Theme;
use ratatui::style::Color;

/// Default dark theme
pub fn chatstream() -> Theme {
    Theme {
        bg_color: Color::Rgb(24, 24, 37),
        title_color: Color::Rgb(139, 233, 253),
        accent_color: Color::Rgb(189, 147, 249),
        text_color: Color::Rgb(203, 213, 225),
        dim_color: Color::Rgb(148, 163, 184),
        success_color: Color::Rgb(80, 250, 123),
        warning_color: Color::Rgb(255, 203, 107),
        error_color: Color::Rgb(255, 85, 85),
        info_color: Color::Rgb(139, 233, 253),
        processing_color: Color::Rgb(189, 147, 249),
        user_msg_color: Color::Rgb(226, 232, 240),
        user_msg_bg_color: Color::Rgb(40, 40, 60), // Dark purple-blue
        assistant_msg_color: Color::Rgb(203, 213, 225),
        assistant_msg_bg_color: Color::Rgb(36, 36, 48),
        card_border_color: Color::Rgb(189, 147, 249),
        badge_bg_color: Color::Rgb(51, 65, 85),
        badge_fg_color: Color::Rgb(203, 213, 225),
        input_border_color: Color::Rgb(88, 91, 112),
        input_placeholder_color: Color::Rgb(100, 116, 139),
        status_bar_bg_color: Color::Rgb(44, 44, 57),
        logo_primary_color: Color::Rgb(255, 140, 90), // Rust orange
        logo_secondary_color: Color::Rgb(139, 233, 253),
    }
}
