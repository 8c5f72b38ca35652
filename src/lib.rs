#![doc(test(attr(deny(warnings))))]

//! Expense Tracker keeps a single user's expenses in a local JSON file and
//! offers validated add, update, delete, list and monthly summary operations.

pub mod cli;
pub mod config;
pub mod currency;
pub mod display;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod time;
pub mod utils;
pub mod validation;

pub use errors::{CliError, ExpenseError, Result};
pub use ledger::{Collection, Expense, ExpenseUpdate, Ledger};
pub use storage::{ExpenseStore, JsonExpenseStore};
pub use time::{Clock, FixedClock, SystemClock};

/// Initializes global tracing at the default verbosity.
pub fn init() {
    utils::init_tracing(0);
}
