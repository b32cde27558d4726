//! The ledger bound to its storage entry.
//!
//! `Tracker` is the only place the ledger is mutated. Every mutation is
//! written back to storage before it returns; a failed write undoes the
//! mutation, so memory and storage never disagree.

use tracing::{debug, info, warn};

use crate::{
    Currency, Ledger, LedgerView, ResultEngine, Storage, Totals, Transaction, TransactionForm,
    view,
};

pub struct Tracker<S> {
    storage: S,
    key: String,
    currency: Currency,
    ledger: Ledger,
}

impl<S: Storage> Tracker<S> {
    /// Reads the ledger stored under `key`. A key that was never written
    /// yields an empty ledger; a corrupt entry is an error.
    pub fn load(storage: S, key: impl Into<String>, currency: Currency) -> ResultEngine<Self> {
        let key = key.into();
        let ledger = match storage.get_item(&key)? {
            Some(raw) => serde_json::from_str::<Ledger>(&raw)?,
            None => Ledger::new(),
        };
        debug!(key = %key, transactions = ledger.len(), "ledger loaded");

        Ok(Self {
            storage,
            key,
            currency,
            ledger,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    /// Full table and totals for the current ledger.
    pub fn view(&self) -> LedgerView {
        view::render(&self.ledger, self.currency)
    }

    /// Validates `form`, appends the transaction and clears the form.
    ///
    /// On any error the ledger and the form are left untouched.
    pub fn submit(&mut self, form: &mut TransactionForm) -> ResultEngine<()> {
        let transaction = form.validate()?;
        self.add(transaction)?;
        form.clear();
        Ok(())
    }

    /// Appends a transaction and persists the ledger.
    pub fn add(&mut self, transaction: Transaction) -> ResultEngine<()> {
        let description = transaction.description.clone();
        let amount = transaction.amount;
        let kind = transaction.kind;

        self.ledger.push(transaction);
        if let Err(err) = self.persist() {
            self.ledger.pop();
            warn!(error = %err, "persist failed, add rolled back");
            return Err(err);
        }

        info!(%description, %amount, kind = kind.as_str(), "transaction added");
        Ok(())
    }

    /// Removes the transaction at `position` and persists the ledger.
    pub fn remove(&mut self, position: usize) -> ResultEngine<Transaction> {
        let removed = self.ledger.remove(position)?;
        if let Err(err) = self.persist() {
            self.ledger.reinsert(position, removed);
            warn!(error = %err, position, "persist failed, removal rolled back");
            return Err(err);
        }

        info!(
            position,
            description = %removed.description,
            amount = %removed.amount,
            "transaction removed"
        );
        Ok(removed)
    }

    fn persist(&mut self) -> ResultEngine<()> {
        let payload = serde_json::to_string(&self.ledger)?;
        self.storage.set_item(&self.key, &payload)?;
        debug!(key = %self.key, transactions = self.ledger.len(), "ledger persisted");
        Ok(())
    }
}
