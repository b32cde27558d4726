pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, TerminalSession};
use theme::Theme;

/// Draws the whole UI from `state`. Nothing is kept between frames.
pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Form, table, totals
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::ledger::render(frame, layout[1], state);
    render_bottom_bar(frame, layout[2], state, &theme);
    components::alert::render(frame, area, state.alert.as_deref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let saved = state
        .last_saved
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled("Currency", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.currency)),
        Span::styled("Storage", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.storage_label)),
        Span::styled("Saved", Style::default().fg(theme.dim)),
        Span::raw(format!(": {saved}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(
        &components::hints::hints_for(state.focus),
        theme,
    );

    parts.push(components::hints::hint_separator(theme));
    parts.push(Span::styled("Esc", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

#[cfg(test)]
mod tests {
    use engine::{
        AmountInput, Currency, MemoryStorage, Money, Tracker, Transaction, TransactionKind,
    };
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::App;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_with(transactions: Vec<Transaction>) -> App<MemoryStorage> {
        let mut tracker = Tracker::load(MemoryStorage::new(), "ui", Currency::Brl).unwrap();
        for tx in transactions {
            tracker.add(tx).unwrap();
        }
        App::with_tracker(tracker, "memory".to_string())
    }

    #[test]
    fn empty_ledger_shows_zero_totals() {
        let app = app_with(Vec::new());
        let screen = draw(&app.state);

        assert!(screen.contains("Total income"));
        assert!(screen.contains("Total expense"));
        assert!(screen.contains("Net"));
        assert_eq!(screen.matches("R$ 0,00").count(), 3);
        assert!(screen.contains("Description"));
        assert!(screen.contains("Storage: memory"));
    }

    #[test]
    fn rows_and_totals_are_drawn() {
        let app = app_with(vec![
            Transaction::new("Salary", Money::new(420_000), TransactionKind::Income).unwrap(),
            Transaction::new("Groceries", Money::new(35_050), TransactionKind::Expense).unwrap(),
        ]);
        let screen = draw(&app.state);

        assert!(screen.contains("Salary"));
        assert!(screen.contains("Groceries"));
        assert!(screen.contains("R$ 4.200,00"));
        assert!(screen.contains("R$ 350,50"));
        assert!(screen.contains("R$ 3.849,50"));
        assert!(screen.contains("Income"));
        assert!(screen.contains("Expense"));
    }

    #[test]
    fn amount_field_shows_formatted_input() {
        let mut app = app_with(Vec::new());
        app.state.form.amount = AmountInput::from_raw("1000");
        let screen = draw(&app.state);

        assert!(screen.contains("R$ 10,00"));
    }

    #[test]
    fn alert_is_drawn_on_top() {
        let mut app = app_with(Vec::new());
        app.state.alert = Some("Fill in all fields!".to_string());
        let screen = draw(&app.state);

        assert!(screen.contains("Fill in all fields!"));
        assert!(screen.contains("Enter to close"));
    }
}
