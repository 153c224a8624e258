//! Keyboard handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, View};
use crate::tui::input::InputAction;

const PAGE_LINES: u16 = 10;

impl App {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.view {
            View::Landing => self.handle_landing_key(key),
            View::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.view = View::Chat,
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::PageUp => return self.scroll_up(PAGE_LINES),
            KeyCode::PageDown => return self.scroll_down(PAGE_LINES),
            KeyCode::Up => return self.scroll_up(1),
            KeyCode::Down => return self.scroll_down(1),
            _ => {}
        }

        match self.input.handle_key(key.code, key.modifiers) {
            InputAction::Submit(text) => self.submit_input(&text),
            InputAction::Cancel => {
                if !self.cancel_request() {
                    self.view = View::Landing;
                }
            }
            InputAction::Continue | InputAction::Ignored => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tui::app::{test_app, View};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[tokio::test]
    async fn test_landing_enter_opens_chat() {
        let mut app = test_app();
        assert_eq!(app.view, View::Landing);
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.view, View::Chat);
    }

    #[tokio::test]
    async fn test_escape_when_idle_returns_to_landing() {
        let mut app = test_app();
        app.view = View::Chat;
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.view, View::Landing);
    }

    #[tokio::test]
    async fn test_escape_while_busy_cancels_and_stays() {
        let mut app = test_app();
        app.view = View::Chat;
        for c in "hello".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));
        assert!(app.session.is_busy());
        assert!(app.input.is_empty());

        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.view, View::Chat);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut app = test_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
