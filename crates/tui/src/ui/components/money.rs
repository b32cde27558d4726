use engine::{Money, TransactionKind};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Colour that identifies a transaction kind everywhere in the UI.
#[must_use]
pub fn kind_style(kind: TransactionKind, theme: &Theme) -> Style {
    match kind {
        TransactionKind::Income => Style::default().fg(theme.positive),
        TransactionKind::Expense => Style::default().fg(theme.negative),
    }
}

#[must_use]
pub fn styled_kind(kind: TransactionKind, theme: &Theme) -> Span<'static> {
    Span::styled(kind.label(), kind_style(kind, theme))
}

/// Creates a bold span for an already formatted total, coloured by the
/// sign of `amount`.
///
/// - Positive amounts: green
/// - Negative amounts: red
/// - Zero: neutral text color
#[must_use]
pub fn styled_total(formatted: &str, amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount.is_positive() {
        theme.positive
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(
        formatted.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
