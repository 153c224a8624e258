//! Toast notifications
//!
//! Short-lived messages drawn in the top-right corner.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::themes::Theme;
use crate::tui::utils::{display_width, truncate_ellipsis};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const TOAST_MAX_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
}

impl Toast {
    fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_LIFETIME
    }
}

/// Active toasts, newest last
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        tracing::debug!(kind = ?toast.kind, "Toast: {}", toast.message);
        self.toasts.push(toast);
    }

    /// Drop expired toasts. Returns true if any were removed.
    pub fn prune(&mut self) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired());
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Draw toasts stacked from the top-right corner of `area`
pub fn render_toasts(buf: &mut Buffer, area: Rect, toasts: &ToastQueue, theme: &Theme) {
    let mut y = area.y + 1;
    for toast in toasts.iter() {
        let max_text = TOAST_MAX_WIDTH.saturating_sub(4) as usize;
        let text = truncate_ellipsis(&toast.message, max_text);
        let width = (display_width(&text) as u16 + 4).min(area.width);
        if y + 3 > area.bottom() || width < 5 {
            break;
        }

        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);
        let color = match toast.kind {
            ToastKind::Info => theme.info_color,
            ToastKind::Error => theme.error_color,
        };

        Clear.render(rect, buf);
        Paragraph::new(Line::from(text))
            .style(Style::default().fg(theme.text_color).bg(theme.bg_color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .render(rect, buf);
        y += 3;
    }
}
