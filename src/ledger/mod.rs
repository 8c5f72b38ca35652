//! Expense bookkeeping: CRUD and monthly totals over a persisted collection.
//!
//! Every mutating call performs a full load, mutation and save cycle; no state
//! survives between calls.

pub mod expense;

use chrono::Datelike;
use tracing::info;

use crate::{
    errors::{ExpenseError, Result},
    storage::ExpenseStore,
    time::{Clock, SystemClock},
    validation::{parse_date, valid_amount, valid_date, valid_description, valid_id, DATE_FORMAT},
};

pub use expense::{next_id, round_cents, Collection, Expense};

const INVALID_DESCRIPTION: &str = "Invalid description: must be 1-100 non-whitespace characters.";
const INVALID_AMOUNT: &str = "Invalid amount: must be a non-negative number.";
const INVALID_DATE: &str = "Invalid date format: use YYYY-MM-DD.";
const INVALID_ID: &str = "Invalid ID: must be a positive integer.";
const NOTHING_TO_UPDATE: &str = "At least one of description, amount, or date must be provided.";

/// Partial edit applied by [`Ledger::update`]. `Some` means "set this field",
/// including zero amounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
}

impl ExpenseUpdate {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.date.is_none()
    }

    fn validate(&self) -> Result<()> {
        if let Some(description) = &self.description {
            if !valid_description(description) {
                return Err(ExpenseError::invalid(INVALID_DESCRIPTION));
            }
        }
        if let Some(amount) = self.amount {
            if !valid_amount(amount) {
                return Err(ExpenseError::invalid(INVALID_AMOUNT));
            }
        }
        if let Some(date) = &self.date {
            if !valid_date(date) {
                return Err(ExpenseError::invalid(INVALID_DATE));
            }
        }
        Ok(())
    }

    fn apply(&self, expense: &mut Expense) {
        if let Some(description) = &self.description {
            expense.description = description.trim().to_string();
        }
        if let Some(amount) = self.amount {
            expense.amount = round_cents(amount);
        }
        if let Some(date) = &self.date {
            expense.date = date.clone();
        }
    }
}

/// Facade that validates requests and coordinates them with the backing store.
pub struct Ledger {
    store: Box<dyn ExpenseStore>,
    clock: Box<dyn Clock>,
}

impl Ledger {
    pub fn new(store: impl ExpenseStore + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            store: Box::new(store),
            clock: Box::new(clock),
        }
    }

    pub fn with_system_clock(store: impl ExpenseStore + 'static) -> Self {
        Self::new(store, SystemClock)
    }

    /// Records a new expense and returns its id. `date` defaults to today.
    pub fn add(&self, description: &str, amount: f64, date: Option<&str>) -> Result<i64> {
        if !valid_description(description) {
            return Err(ExpenseError::invalid(INVALID_DESCRIPTION));
        }
        if !valid_amount(amount) {
            return Err(ExpenseError::invalid(INVALID_AMOUNT));
        }
        let date = match date {
            Some(date) if !valid_date(date) => return Err(ExpenseError::invalid(INVALID_DATE)),
            Some(date) => date.to_string(),
            None => self.clock.today().format(DATE_FORMAT).to_string(),
        };

        let mut expenses = self.store.load()?;
        let id = next_id(&expenses)?;
        expenses.push(Expense::new(id, date, description, amount));
        self.store.save(&expenses)?;
        info!(id, "expense added");
        Ok(id)
    }

    /// Removes the expense with `id`. Returns `false` when nothing matched.
    pub fn delete(&self, id: i64) -> Result<bool> {
        if !valid_id(id) {
            return Err(ExpenseError::invalid(INVALID_ID));
        }
        let mut expenses = self.store.load()?;
        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() == before {
            return Ok(false);
        }
        self.store.save(&expenses)?;
        info!(id, "expense deleted");
        Ok(true)
    }

    /// All expenses in stored order.
    pub fn list(&self) -> Result<Collection> {
        self.store.load()
    }

    /// Applies `changes` to the expense with `id`. Returns `false` when nothing matched.
    pub fn update(&self, id: i64, changes: &ExpenseUpdate) -> Result<bool> {
        if changes.is_empty() {
            return Err(ExpenseError::invalid(NOTHING_TO_UPDATE));
        }
        if !valid_id(id) {
            return Err(ExpenseError::invalid(INVALID_ID));
        }
        changes.validate()?;

        let mut expenses = self.store.load()?;
        let mut matched = false;
        for expense in expenses.iter_mut().filter(|expense| expense.id == id) {
            changes.apply(expense);
            matched = true;
        }
        if matched {
            self.store.save(&expenses)?;
            info!(id, "expense updated");
        }
        Ok(matched)
    }

    /// Total spent, rounded to cents. With `month`, only that month of the current year counts.
    pub fn summary(&self, month: Option<u32>) -> Result<f64> {
        let expenses = self.store.load()?;
        let total: f64 = match month {
            Some(month) => {
                let year = self.clock.current_year();
                expenses
                    .iter()
                    .filter(|expense| {
                        parse_date(&expense.date)
                            .map(|date| date.month() == month && date.year() == year)
                            .unwrap_or(false)
                    })
                    .map(|expense| expense.amount)
                    .sum()
            }
            None => expenses.iter().map(|expense| expense.amount).sum(),
        };
        Ok(round_cents(total))
    }
}
