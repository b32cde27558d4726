//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a submitted form is incomplete or its amount
//!   is not positive or exceeds [`Money::MAX_AMOUNT`]. The message is meant
//!   to be shown to the user as is.
//! - [`PositionOutOfRange`] thrown when a removal targets a row that does not
//!   exist.
//! - [`Io`] and [`Json`] thrown by the storage layer.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`PositionOutOfRange`]: EngineError::PositionOutOfRange
//!  [`Io`]: EngineError::Io
//!  [`Json`]: EngineError::Json
//!  [`Money::MAX_AMOUNT`]: crate::Money::MAX_AMOUNT
use thiserror::Error;

/// Reasons a form submission is refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fill in all fields!")]
    MissingField,
    #[error("Enter an amount greater than zero!")]
    NonPositiveAmount,
    #[error("Amount is too large!")]
    AmountTooLarge,
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no transaction at position {position} (ledger has {len})")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Unknown transaction kind: {0} (expected income or expense)")]
    UnknownKind(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (
                Self::PositionOutOfRange {
                    position: a,
                    len: la,
                },
                Self::PositionOutOfRange {
                    position: b,
                    len: lb,
                },
            ) => a == b && la == lb,
            (Self::UnsupportedCurrency(a), Self::UnsupportedCurrency(b)) => a == b,
            (Self::UnknownKind(a), Self::UnknownKind(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
