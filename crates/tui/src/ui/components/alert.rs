use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::ui::theme::Theme;

/// Calculates a rect of the given size centered in `area`.
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Modal message box drawn over everything else.
pub fn render(frame: &mut Frame<'_>, area: Rect, message: Option<&str>) {
    let Some(message) = message else {
        return;
    };
    let theme = Theme::default();

    let footer = "Enter to close";
    let text_width = message.chars().count().max(footer.len());
    let width = (text_width + 6).min(area.width as usize) as u16;
    let rect = centered_box(width, 6, area);

    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(Span::styled(
            " Alert ",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(footer, Style::default().fg(theme.dim))),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}
