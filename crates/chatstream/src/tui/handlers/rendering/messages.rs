//! Message bubbles and the work-order results panel

use chatstream_core::ai::{percent_label, CardData, WorkOrder};
use chatstream_core::chat::{Message, Role};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::tui::themes::Theme;
use crate::tui::utils::{display_width, truncate_ellipsis, wrap_text};

/// Part-number badges shown per work order before collapsing into "+N"
const MAX_PART_BADGES: usize = 4;

/// Bubbles take at most this share of the width
const BUBBLE_WIDTH_PERCENT: usize = 75;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Lay out the whole conversation for a given width
pub fn conversation_lines(
    messages: &[Message],
    width: u16,
    theme: &Theme,
    busy: bool,
    tick: usize,
) -> Vec<Line<'static>> {
    let width = width as usize;
    let mut lines = Vec::new();

    for (i, message) in messages.iter().enumerate() {
        let is_last = i + 1 == messages.len();
        match (message.role, &message.card_data) {
            (Role::User, _) => lines.extend(user_bubble(&message.content, width, theme)),
            (Role::Assistant, Some(cards)) => lines.extend(cards_panel(cards, width, theme)),
            (Role::Assistant, None) if message.content.is_empty() && busy && is_last => {
                lines.push(Line::from(Span::styled(
                    format!(" {} Thinking...", spinner_frame(tick)),
                    Style::default().fg(theme.processing_color),
                )));
            }
            (Role::Assistant, None) => {
                lines.extend(assistant_bubble(&message.content, width, theme))
            }
        }
        lines.push(Line::default());
    }

    lines
}

fn bubble_width(width: usize) -> usize {
    (width * BUBBLE_WIDTH_PERCENT / 100).max(10).min(width)
}

/// Right-aligned bubble
fn user_bubble(text: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let inner = bubble_width(width).saturating_sub(2);
    let rows = wrap_text(text, inner);
    let row_width = rows.iter().map(|r| display_width(r)).max().unwrap_or(0);
    let style = Style::default()
        .fg(theme.user_msg_color)
        .bg(theme.user_msg_bg_color);

    rows.into_iter()
        .map(|row| {
            let pad_right = row_width - display_width(&row);
            let indent = width.saturating_sub(row_width + 2);
            Line::from(vec![
                Span::raw(" ".repeat(indent)),
                Span::styled(format!(" {}{} ", row, " ".repeat(pad_right)), style),
            ])
        })
        .collect()
}

/// Left-aligned bubble
fn assistant_bubble(text: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let inner = bubble_width(width).saturating_sub(2);
    let style = Style::default()
        .fg(theme.assistant_msg_color)
        .bg(theme.assistant_msg_bg_color);

    wrap_text(text, inner)
        .into_iter()
        .map(|row| Line::from(Span::styled(format!(" {} ", row), style)))
        .collect()
}

/// Structured results: header, summary, one block per work order
fn cards_panel(data: &CardData, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let border = Style::default().fg(theme.card_border_color);
    let inner = width.saturating_sub(4).max(8);
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("╭ ", border),
        Span::styled(
            truncate_ellipsis(&format!("Results for \"{}\"", data.query), inner),
            Style::default()
                .fg(theme.title_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("│ ", border),
        Span::styled(
            format!("{} found", data.total_found),
            Style::default().fg(theme.text_color),
        ),
        Span::styled(" · avg similarity ", Style::default().fg(theme.dim_color)),
        Span::styled(
            percent_label(data.avg_similarity),
            Style::default().fg(theme.similarity_color(data.avg_similarity_percent())),
        ),
    ]));

    if data.work_orders.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("│ ", border),
            Span::styled("No matching work orders", Style::default().fg(theme.dim_color)),
        ]));
    }

    for order in &data.work_orders {
        lines.push(Line::from(Span::styled("│", border)));
        lines.extend(
            work_order_rows(order, inner, theme)
                .into_iter()
                .map(|mut row| {
                    row.spans.insert(0, Span::styled("│ ", border));
                    row
                }),
        );
    }

    lines.push(Line::from(Span::styled(
        format!("╰{}", "─".repeat(inner.min(40))),
        border,
    )));
    lines
}

fn work_order_rows(order: &WorkOrder, inner: usize, theme: &Theme) -> Vec<Line<'static>> {
    let dim = Style::default().fg(theme.dim_color);
    let mut rows = Vec::new();

    let mut header = vec![Span::styled(
        order
            .work_order_id
            .clone()
            .unwrap_or_else(|| "Work order".to_string()),
        Style::default()
            .fg(theme.accent_color)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(percent) = order.similarity_percent() {
        header.push(Span::raw(" "));
        header.push(Span::styled(
            format!(" {}% ", percent),
            Style::default()
                .fg(theme.bg_color)
                .bg(theme.similarity_color(percent)),
        ));
    }
    if let Some(tech) = &order.technician {
        header.push(Span::styled("  tech ", dim));
        header.push(Span::styled(
            truncate_ellipsis(tech, 24),
            Style::default().fg(theme.text_color),
        ));
    }
    rows.push(Line::from(header));

    let dates = match (&order.created_date, &order.completed_date) {
        (Some(created), Some(completed)) => Some(format!("{} → {}", created, completed)),
        (Some(created), None) => Some(format!("opened {}", created)),
        (None, Some(completed)) => Some(format!("closed {}", completed)),
        (None, None) => None,
    };
    if let Some(dates) = dates {
        rows.push(Line::from(Span::styled(format!("  {}", dates), dim)));
    }

    if let Some(description) = &order.description {
        rows.push(Line::from(Span::styled(
            format!("  {}", truncate_ellipsis(description, inner.saturating_sub(2))),
            Style::default().fg(theme.text_color),
        )));
    }

    let badges = order.part_number_badges(MAX_PART_BADGES);
    if !badges.is_empty() {
        let badge_style = Style::default()
            .fg(theme.badge_fg_color)
            .bg(theme.badge_bg_color);
        let mut spans = vec![Span::raw("  ")];
        for badge in badges {
            spans.push(Span::styled(format!(" {} ", badge), badge_style));
            spans.push(Span::raw(" "));
        }
        rows.push(Line::from(spans));
    }

    rows
}
