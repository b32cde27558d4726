//! Core of the Tally expense tracker.
//!
//! The whole state is one [`Ledger`]: an ordered list of income and expense
//! [`Transaction`]s. A [`Tracker`] owns the ledger together with the
//! [`Storage`] entry it is persisted under and exposes the operations front
//! ends need:
//!
//! - **load**: [`Tracker::load`] reads the stored list (missing key = empty).
//! - **add**: [`Tracker::submit`] validates a [`TransactionForm`], appends
//!   and persists.
//! - **remove**: [`Tracker::remove`] deletes by position and persists.
//! - **render**: [`Tracker::view`] rebuilds rows and totals from scratch.
//!
//! ```rust
//! use engine::{AmountInput, Currency, MemoryStorage, Tracker, TransactionForm, TransactionKind};
//!
//! let mut tracker = Tracker::load(MemoryStorage::new(), "ledger", Currency::Brl).unwrap();
//! let mut form = TransactionForm {
//!     description: "Salary".to_string(),
//!     amount: AmountInput::from_raw("1000"),
//!     kind: Some(TransactionKind::Income),
//! };
//! tracker.submit(&mut form).unwrap();
//!
//! let view = tracker.view();
//! assert_eq!(view.rows[0].amount, "R$ 10,00");
//! assert_eq!(view.totals.net, "R$ 10,00");
//! ```

pub use currency::Currency;
pub use error::{EngineError, ValidationError};
pub use input::{AmountInput, TransactionForm, digits_only, format_amount_input, parse_amount_input};
pub use ledger::{Ledger, Totals};
pub use money::Money;
pub use storage::{DEFAULT_STORAGE_KEY, DEFAULT_STORAGE_PATH, FileStorage, MemoryStorage, Storage};
pub use tracker::Tracker;
pub use transactions::{Transaction, TransactionKind};
pub use view::{LedgerView, RowView, TotalsView, render};

mod currency;
mod error;
mod input;
mod ledger;
mod money;
mod storage;
mod tracker;
mod transactions;
mod view;

pub type ResultEngine<T> = Result<T, EngineError>;
