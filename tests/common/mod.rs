#![allow(dead_code)]

use std::path::PathBuf;

use expense_tracker::{Expense, FixedClock, JsonExpenseStore, Ledger};
use tempfile::TempDir;

/// Isolated ledger whose "now" is frozen at the given day. Keep the TempDir alive for the test.
pub fn ledger_at(year: i32, month: u32, day: u32) -> (Ledger, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let clock = FixedClock::at_date(year, month, day).expect("valid clock date");
    let store = JsonExpenseStore::with_clock(data_file(&temp), clock);
    (Ledger::new(store, clock), temp)
}

pub fn store_in(temp: &TempDir) -> JsonExpenseStore {
    let clock = FixedClock::at_date(2024, 6, 1).expect("valid clock date");
    JsonExpenseStore::with_clock(data_file(temp), clock)
}

pub fn data_file(temp: &TempDir) -> PathBuf {
    temp.path().join("expenses.json")
}

/// Looks up a stored expense by id through the public listing.
pub fn find(ledger: &Ledger, id: i64) -> Expense {
    ledger
        .list()
        .expect("list expenses")
        .into_iter()
        .find(|expense| expense.id == id)
        .expect("expense present")
}
