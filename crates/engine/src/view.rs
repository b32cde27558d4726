//! Render model.
//!
//! Front ends never format money or add up totals themselves: they ask for
//! a [`LedgerView`] after every mutation and draw it as is. The view is
//! rebuilt from the whole ledger each time.

use crate::{Currency, Ledger, Money, Totals, TransactionKind};

/// One table row, bound to the position it was rendered at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub position: usize,
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
}

/// Formatted totals plus the raw values, so callers can colour the net.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TotalsView {
    pub income: String,
    pub expense: String,
    pub net: String,
    pub raw: Totals,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerView {
    pub rows: Vec<RowView>,
    pub totals: TotalsView,
}

impl TotalsView {
    pub fn new(totals: Totals, currency: Currency) -> Self {
        Self {
            income: totals.income.format(currency),
            expense: totals.expense.format(currency),
            net: totals.net.format(currency),
            raw: totals,
        }
    }
}

impl LedgerView {
    pub fn net(&self) -> Money {
        self.totals.raw.net
    }
}

/// Builds the full table and totals for `ledger`.
pub fn render(ledger: &Ledger, currency: Currency) -> LedgerView {
    let rows = ledger
        .transactions()
        .iter()
        .enumerate()
        .map(|(position, tx)| RowView {
            position,
            description: tx.description.clone(),
            amount: tx.amount.format(currency),
            kind: tx.kind,
        })
        .collect();

    LedgerView {
        rows,
        totals: TotalsView::new(ledger.totals(), currency),
    }
}
