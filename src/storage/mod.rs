pub mod json_backend;

use crate::{errors::Result, ledger::Expense};

/// Abstraction over persistence backends holding one whole expense collection.
pub trait ExpenseStore: Send + Sync {
    /// Reads the entire collection, creating an empty one on first use.
    fn load(&self) -> Result<Vec<Expense>>;

    /// Replaces the persisted collection with `expenses`.
    fn save(&self, expenses: &[Expense]) -> Result<()>;
}

impl<S: ExpenseStore + ?Sized> ExpenseStore for Box<S> {
    fn load(&self) -> Result<Vec<Expense>> {
        (**self).load()
    }

    fn save(&self, expenses: &[Expense]) -> Result<()> {
        (**self).save(expenses)
    }
}

pub use json_backend::{collection_warnings, JsonExpenseStore, CORRUPT_EXTENSION};
