//! UI rendering coordinator
//!
//! Main entry point that dispatches to specialized render modules.

mod messages;
mod views;

use ratatui::{style::Style, widgets::Block, Frame};

use crate::tui::app::{App, View};
use crate::tui::components::render_toasts;

impl App {
    /// Main UI rendering dispatcher
    pub fn ui(&mut self, f: &mut Frame) {
        let bg = Block::default().style(Style::default().bg(self.theme.bg_color));
        f.render_widget(bg, f.area());

        match self.view {
            View::Landing => self.render_landing(f),
            View::Chat => self.render_chat(f),
        }

        // Render toasts on top of everything
        if !self.toasts.is_empty() {
            let area = f.area();
            render_toasts(f.buffer_mut(), area, &self.toasts, &self.theme);
        }
    }
}
