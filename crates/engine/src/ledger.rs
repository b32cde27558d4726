use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, Transaction, TransactionKind};

/// Ordered list of transactions, in insertion order.
///
/// Rows are addressed by their 0-based position in the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, position: usize) -> Option<&Transaction> {
        self.transactions.get(position)
    }

    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Removes and returns the transaction at `position`.
    pub fn remove(&mut self, position: usize) -> ResultEngine<Transaction> {
        if position >= self.transactions.len() {
            return Err(EngineError::PositionOutOfRange {
                position,
                len: self.transactions.len(),
            });
        }
        Ok(self.transactions.remove(position))
    }

    /// Puts a previously removed transaction back where it was.
    pub(crate) fn reinsert(&mut self, position: usize, transaction: Transaction) {
        let position = position.min(self.transactions.len());
        self.transactions.insert(position, transaction);
    }

    pub(crate) fn pop(&mut self) -> Option<Transaction> {
        self.transactions.pop()
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.transactions)
    }
}

impl From<Vec<Transaction>> for Ledger {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

/// Income, expense and net sums over a set of transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

impl Totals {
    /// Recomputes every sum from scratch.
    ///
    /// Sums are accumulated in `i128` and clamp at the `i64` bounds, so a
    /// ledger holding many maximal amounts still renders.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let sum_of = |kind: TransactionKind| -> i128 {
            transactions
                .iter()
                .filter(|tx| tx.kind == kind)
                .map(|tx| i128::from(tx.amount.minor()))
                .sum()
        };
        let income = sum_of(TransactionKind::Income);
        let expense = sum_of(TransactionKind::Expense);
        Self {
            income: saturate(income),
            expense: saturate(expense),
            net: saturate(income - expense),
        }
    }
}

fn saturate(minor: i128) -> Money {
    let clamped = minor.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
    Money::new(i64::try_from(clamped).unwrap_or_default())
}
