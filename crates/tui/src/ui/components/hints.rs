use ratatui::{style::Style, text::Span};

use crate::{app::Focus, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints for whatever currently has focus.
pub fn hints_for(focus: Focus) -> Vec<KeyHint> {
    match focus {
        Focus::Description | Focus::Amount => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "add"),
        ],
        Focus::Kind => vec![
            KeyHint::new("←→", "kind"),
            KeyHint::new("i/e", "income/expense"),
            KeyHint::new("Enter", "add"),
        ],
        Focus::Submit => vec![
            KeyHint::new("Enter", "add"),
            KeyHint::new("Tab", "table"),
        ],
        Focus::Table => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("d", "delete"),
            KeyHint::new("Tab", "form"),
            KeyHint::new("q", "quit"),
        ],
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}
