use engine::TransactionKind;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, Focus, SubmitLook},
    ui::{
        components::{
            card::{Card, StatCard},
            money::{kind_style, styled_kind, styled_total},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Form
            Constraint::Min(3),    // Table
            Constraint::Length(3), // Totals
        ])
        .split(area);

    render_form(frame, layout[0], state, &theme);
    render_table(frame, layout[1], state, &theme);
    render_totals(frame, layout[2], state, &theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let fields = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(16),
            Constraint::Length(22),
            Constraint::Length(14),
            Constraint::Length(9),
        ])
        .split(area);

    let amount = state.form.amount.display(state.currency);
    render_text_field(
        frame,
        fields[0],
        "Description",
        &state.form.description,
        state.focus == Focus::Description,
        theme,
    );
    render_text_field(
        frame,
        fields[1],
        "Amount",
        &amount,
        state.focus == Focus::Amount,
        theme,
    );

    let kind = match state.form.kind {
        Some(kind) => styled_kind(kind, theme),
        None => Span::styled("(select)", Style::default().fg(theme.dim)),
    };
    Card::new("Kind", theme)
        .focused(state.focus == Focus::Kind)
        .render_with(frame, fields[2], Paragraph::new(Line::from(kind)));

    let button_style = match state.submit_look() {
        SubmitLook::Neutral => Style::default().fg(theme.text),
        SubmitLook::Income => Style::default().fg(Color::Black).bg(theme.positive),
        SubmitLook::Expense => Style::default().fg(Color::Black).bg(theme.negative),
        SubmitLook::Resetting => Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::REVERSED),
    };
    Card::new("", theme)
        .focused(state.focus == Focus::Submit)
        .render_with(
            frame,
            fields[3],
            Paragraph::new(Span::styled(" Add ", button_style.add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center),
        );
}

/// Renders a single-line input: value plus a cursor when focused.
fn render_text_field(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };
    Card::new(title, theme).focused(focused).render_with(
        frame,
        area,
        Paragraph::new(Span::styled(format!("{value}{cursor}"), style)),
    );
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Table;

    let header = Row::new(vec!["#", "Description", "Amount", "Kind", ""])
        .style(Style::default().fg(theme.dim).add_modifier(Modifier::BOLD));

    let rows = state.view.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from((row.position + 1).to_string()),
            Cell::from(row.description.clone()),
            Cell::from(row.amount.clone()),
            Cell::from(styled_kind(row.kind, theme)),
            Cell::from(Span::styled("✕", Style::default().fg(theme.error))),
        ])
    });

    let widths = [
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(18),
        Constraint::Length(8),
        Constraint::Length(2),
    ];

    let highlight = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Card::new("Transactions", theme).focused(focused).block())
        .row_highlight_style(highlight)
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if !state.view.rows.is_empty() {
        table_state.select(Some(state.selected));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = &state.view.totals;
    let emphasized = |kind: TransactionKind, text: &str| {
        Span::styled(
            text.to_string(),
            kind_style(kind, theme).add_modifier(Modifier::BOLD),
        )
    };

    StatCard::new(
        "Total income",
        emphasized(TransactionKind::Income, &totals.income),
        theme,
    )
    .render(frame, cards[0]);
    StatCard::new(
        "Total expense",
        emphasized(TransactionKind::Expense, &totals.expense),
        theme,
    )
    .render(frame, cards[1]);
    StatCard::new("Net", styled_total(&totals.net, state.view.net(), theme), theme)
        .render(frame, cards[2]);
}
