//! Landing and chat views

use chatstream_core::chat::RequestPhase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::messages::{conversation_lines, spinner_frame};
use crate::tui::app::App;
use crate::tui::utils::display_width;

const LOGO: [&str; 3] = [
    "┌─┐┬ ┬┌─┐┌┬┐┌─┐┌┬┐┬─┐┌─┐┌─┐┌┬┐",
    "│  ├─┤├─┤ │ └─┐ │ ├┬┘├┤ ├─┤│││",
    "└─┘┴ ┴┴ ┴ ┴ └─┘ ┴ ┴└─└─┘┴ ┴┴ ┴",
];

impl App {
    pub(super) fn render_landing(&self, f: &mut Frame) {
        let area = f.area();
        let height = LOGO.len() as u16 + 6;
        let top = area.y + area.height.saturating_sub(height) / 2;
        let rect = Rect::new(area.x, top, area.width, height.min(area.height));

        let mut lines: Vec<Line> = LOGO
            .iter()
            .map(|row| {
                Line::from(Span::styled(
                    *row,
                    Style::default().fg(self.theme.logo_primary_color),
                ))
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Ask about past work orders, parts and technicians",
            Style::default().fg(self.theme.text_color),
        )));
        lines.push(Line::from(Span::styled(
            self.endpoint.clone(),
            Style::default().fg(self.theme.dim_color),
        )));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(self.theme.logo_secondary_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" start chatting   ", Style::default().fg(self.theme.dim_color)),
            Span::styled(
                "q",
                Style::default()
                    .fg(self.theme.logo_secondary_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" quit", Style::default().fg(self.theme.dim_color)),
        ]));

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
    }

    pub(super) fn render_chat(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Conversation
                Constraint::Length(1), // Status bar
                Constraint::Length(3), // Input
            ])
            .split(f.area());

        self.render_conversation(f, chunks[0]);
        self.render_status(f, chunks[1]);
        self.render_input(f, chunks[2]);
    }

    fn render_conversation(&mut self, f: &mut Frame, area: Rect) {
        let area = Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            ..area
        };

        if self.session.messages().is_empty() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Type a question below and press Enter",
                Style::default().fg(self.theme.dim_color),
            )))
            .alignment(Alignment::Center);
            let row = Rect {
                y: area.y + area.height / 2,
                height: 1,
                ..area
            };
            f.render_widget(hint, row);
            return;
        }

        let lines = conversation_lines(
            self.session.messages(),
            area.width,
            &self.theme,
            self.session.is_busy(),
            self.tick,
        );

        let (top, offset) = clamp_scroll(lines.len(), area.height, self.scroll_offset);
        self.scroll_offset = offset;

        f.render_widget(Paragraph::new(lines).scroll((top, 0)), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let dim = Style::default().fg(self.theme.dim_color);
        let line = match self.session.phase() {
            RequestPhase::Idle => Line::from(vec![
                Span::styled(" Enter", Style::default().fg(self.theme.accent_color)),
                Span::styled(" send  ", dim),
                Span::styled("Esc", Style::default().fg(self.theme.accent_color)),
                Span::styled(" back  ", dim),
                Span::styled("PgUp/PgDn", Style::default().fg(self.theme.accent_color)),
                Span::styled(" scroll  ", dim),
                Span::styled("Ctrl+C", Style::default().fg(self.theme.accent_color)),
                Span::styled(" quit", dim),
            ]),
            phase => {
                let label = if phase == RequestPhase::Sending {
                    "Sending"
                } else {
                    "Streaming"
                };
                let elapsed = self
                    .session
                    .elapsed()
                    .map(|d| format!(" {:.1}s", d.as_secs_f32()))
                    .unwrap_or_default();
                Line::from(vec![
                    Span::styled(
                        format!(" {} {}{}", spinner_frame(self.tick), label, elapsed),
                        Style::default().fg(self.theme.processing_color),
                    ),
                    Span::styled("  Esc", Style::default().fg(self.theme.accent_color)),
                    Span::styled(" cancel", dim),
                ])
            }
        };

        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(self.theme.status_bar_bg_color)),
            area,
        );
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let busy = self.session.is_busy();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if busy {
                self.theme.dim_color
            } else {
                self.theme.input_border_color
            }))
            .title(" Message ");
        let inner = block.inner(area);

        let content = if busy {
            Line::from(Span::styled(
                "Waiting for reply...",
                Style::default().fg(self.theme.input_placeholder_color),
            ))
        } else if self.input.is_empty() {
            Line::from(Span::styled(
                "Ask something",
                Style::default().fg(self.theme.input_placeholder_color),
            ))
        } else {
            Line::from(Span::styled(
                self.input.text().to_string(),
                Style::default().fg(self.theme.text_color),
            ))
        };

        // Keep the cursor visible on long input
        let before_cursor: String = self
            .input
            .text()
            .chars()
            .take(self.input.cursor())
            .collect();
        let cursor_col = u16::try_from(display_width(&before_cursor)).unwrap_or(u16::MAX);
        let h_scroll = cursor_col.saturating_sub(inner.width.saturating_sub(1));

        f.render_widget(Paragraph::new(content).block(block).scroll((0, h_scroll)), area);

        if !busy {
            f.set_cursor_position(Position::new(inner.x + (cursor_col - h_scroll), inner.y));
        }
    }
}

/// Scroll is measured from the bottom; clamp so we never scroll past the top.
/// Returns the first visible row and the clamped offset.
fn clamp_scroll(total_lines: usize, height: u16, offset: u16) -> (u16, u16) {
    let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(height);
    let offset = offset.min(max_offset);
    (max_offset - offset, offset)
}

#[cfg(test)]
mod tests {
    use super::clamp_scroll;
    use crate::tui::app::{test_app, View};
    use chatstream_core::ai::ChatEvent;
    use chatstream_core::chat::{StreamUpdate, UpdateKind};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_clamp_scroll_pins_to_bottom_and_top() {
        assert_eq!(clamp_scroll(50, 10, 0), (40, 0));
        assert_eq!(clamp_scroll(50, 10, 15), (25, 15));
        assert_eq!(clamp_scroll(50, 10, 500), (0, 40));
        assert_eq!(clamp_scroll(5, 10, 3), (0, 0));
    }

    #[test]
    fn test_clamp_scroll_saturates_huge_conversations() {
        // 70_000 would wrap to 4_464 with a plain cast
        let (top, offset) = clamp_scroll(70_000, 20, 0);
        assert_eq!(top, u16::MAX - 20);
        assert_eq!(offset, 0);

        let (top, offset) = clamp_scroll(70_000, 20, 100);
        assert_eq!(top, u16::MAX - 120);
        assert_eq!(offset, 100);
    }

    #[tokio::test]
    async fn test_landing_mentions_endpoint() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("http://localhost:8000/chat"));
        assert!(text.contains("start chatting"));
    }

    #[tokio::test]
    async fn test_chat_view_renders_streamed_reply() {
        let mut app = test_app();
        app.view = View::Chat;
        let request = app.session.begin("hello").unwrap();
        app.session.apply(StreamUpdate::new(
            &request.message_id,
            UpdateKind::Event(ChatEvent::Token {
                token: "Hi there".to_string(),
                done: true,
            }),
        ));

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains(" hello "));
        assert!(text.contains(" Hi there "));
        assert!(text.contains("Enter send"));
    }
}
