//! Transaction primitives.
//!
//! A `Transaction` is one recorded income or expense entry. It is created
//! from a validated form and destroyed only by an explicit removal.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Human readable label used in tables and selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// The other kind; selectors cycle through both values.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "" => Err(ValidationError::MissingField.into()),
            other => Err(EngineError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTransaction")]
pub struct Transaction {
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Builds a transaction, enforcing a non-empty description and a
    /// strictly positive amount.
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        kind: TransactionKind,
    ) -> ResultEngine<Self> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::MissingField.into());
        }
        if !amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        if amount > Money::MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge.into());
        }
        Ok(Self {
            description,
            amount,
            kind,
        })
    }
}

/// Shape of a transaction as found in storage, checked before it becomes a
/// [`Transaction`].
#[derive(Deserialize)]
struct StoredTransaction {
    description: String,
    amount: Money,
    kind: TransactionKind,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = String;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        if stored.amount.is_negative() {
            return Err(format!(
                "negative amount {} for \"{}\"",
                stored.amount, stored.description
            ));
        }
        if stored.amount > Money::MAX_AMOUNT {
            return Err(format!(
                "amount {} for \"{}\" exceeds the maximum {}",
                stored.amount,
                stored.description,
                Money::MAX_AMOUNT
            ));
        }
        Ok(Self {
            description: stored.description,
            amount: stored.amount,
            kind: stored.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_description() {
        let tx = Transaction::new("  Rent ", Money::new(150_000), TransactionKind::Expense).unwrap();
        assert_eq!(tx.description, "Rent");
    }

    #[test]
    fn new_rejects_blank_description_and_non_positive_amounts() {
        assert_eq!(
            Transaction::new("   ", Money::new(100), TransactionKind::Income).unwrap_err(),
            EngineError::Validation(ValidationError::MissingField)
        );
        assert_eq!(
            Transaction::new("Salary", Money::ZERO, TransactionKind::Income).unwrap_err(),
            EngineError::Validation(ValidationError::NonPositiveAmount)
        );
        assert_eq!(
            Transaction::new("Salary", Money::new(-1), TransactionKind::Income).unwrap_err(),
            EngineError::Validation(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn new_rejects_amounts_above_the_maximum() {
        assert!(Transaction::new("Salary", Money::MAX_AMOUNT, TransactionKind::Income).is_ok());
        assert_eq!(
            Transaction::new(
                "Salary",
                Money::new(Money::MAX_AMOUNT.minor() + 1),
                TransactionKind::Income
            )
            .unwrap_err(),
            EngineError::Validation(ValidationError::AmountTooLarge)
        );
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(TransactionKind::try_from("Income").unwrap(), TransactionKind::Income);
        assert_eq!(TransactionKind::try_from(" EXPENSE").unwrap(), TransactionKind::Expense);
        assert_eq!(
            TransactionKind::try_from("").unwrap_err(),
            EngineError::Validation(ValidationError::MissingField)
        );
        assert_eq!(
            TransactionKind::try_from("refund").unwrap_err(),
            EngineError::UnknownKind("refund".to_string())
        );
    }

    #[test]
    fn json_shape_is_stable() {
        let tx = Transaction::new("Coffee", Money::new(450), TransactionKind::Expense).unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"description": "Coffee", "amount": 4.5, "kind": "expense"})
        );
    }

    #[test]
    fn stored_negative_amount_is_rejected() {
        let err = serde_json::from_str::<Transaction>(
            r#"{"description":"x","amount":-1.0,"kind":"income"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("negative amount"));
    }

    #[test]
    fn stored_amount_above_maximum_is_rejected() {
        let err = serde_json::from_str::<Transaction>(
            r#"{"description":"x","amount":92233720368547.75,"kind":"income"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
    }
}
