//! Form input handling: the auto-formatted amount field and the validation
//! applied when a form is submitted.
//!
//! The amount field never holds a decimal separator typed by the user. Every
//! keystroke is reduced to its digits and the digits are read as minor units,
//! so typing `1`, `0`, `0`, `0` shows `R$ 10,00`.

use crate::{Currency, Money, ResultEngine, Transaction, TransactionKind, ValidationError};

/// Keeps only the ASCII digits of `raw`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Reads the digits of `raw` as an integer number of minor units.
///
/// Returns `None` when there are no digits or they exceed
/// [`Money::MAX_AMOUNT`].
pub fn parse_amount_input(raw: &str) -> Option<Money> {
    let digits = digits_only(raw);
    if digits.is_empty() {
        return None;
    }
    digits
        .parse::<i64>()
        .ok()
        .map(Money::new)
        .filter(|amount| *amount <= Money::MAX_AMOUNT)
}

/// Reformats raw amount text for display; invalid or empty input becomes the
/// empty string.
///
/// ```rust
/// use engine::{Currency, format_amount_input};
///
/// assert_eq!(format_amount_input("1000", Currency::Brl), "R$ 10,00");
/// assert_eq!(format_amount_input("R$ 10,005", Currency::Brl), "R$ 100,05");
/// assert_eq!(format_amount_input("abc", Currency::Brl), "");
/// ```
pub fn format_amount_input(raw: &str, currency: Currency) -> String {
    parse_amount_input(raw)
        .map(|amount| amount.format(currency))
        .unwrap_or_default()
}

/// State of the amount field while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountInput {
    digits: String,
}

impl AmountInput {
    /// Builds the field from pasted or scripted text.
    pub fn from_raw(raw: &str) -> Self {
        let mut input = Self::default();
        for ch in raw.chars() {
            input.push(ch);
        }
        input
    }

    /// Appends a keystroke. Non-digits are dropped, as are digits that would
    /// push the amount past [`Money::MAX_AMOUNT`].
    pub fn push(&mut self, ch: char) {
        if !ch.is_ascii_digit() {
            return;
        }
        self.digits.push(ch);
        if parse_amount_input(&self.digits).is_none() {
            self.digits.pop();
        }
    }

    pub fn pop(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The typed amount, `None` while the field is empty.
    pub fn amount(&self) -> Option<Money> {
        parse_amount_input(&self.digits)
    }

    /// Text shown in the field.
    pub fn display(&self, currency: Currency) -> String {
        format_amount_input(&self.digits, currency)
    }
}

/// The three fields of the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: AmountInput,
    pub kind: Option<TransactionKind>,
}

impl TransactionForm {
    /// Checks the form and builds the transaction it describes.
    ///
    /// Any empty field (after trimming) is reported before the amount is
    /// checked for positivity.
    pub fn validate(&self) -> ResultEngine<Transaction> {
        let description = self.description.trim();
        let (Some(amount), Some(kind)) = (self.amount.amount(), self.kind) else {
            return Err(ValidationError::MissingField.into());
        };
        if description.is_empty() {
            return Err(ValidationError::MissingField.into());
        }
        Transaction::new(description, amount, kind)
    }

    /// Empties every field, as after a successful submission.
    pub fn clear(&mut self) {
        self.description.clear();
        self.amount.clear();
        self.kind = None;
    }
}
