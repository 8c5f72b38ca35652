use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

/// Magnitude past which `f64` has no fractional cents left to round.
const ROUNDING_LIMIT: f64 = 4_503_599_627_370_496.0 / 100.0;

/// A single recorded expense. Field order here is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: f64,
}

/// Ordered expenses exactly as persisted, insertion order preserved.
pub type Collection = Vec<Expense>;

impl Expense {
    /// Builds a normalized record: trimmed description, amount rounded to cents.
    pub fn new(id: i64, date: impl Into<String>, description: &str, amount: f64) -> Self {
        Self {
            id,
            date: date.into(),
            description: description.trim().to_string(),
            amount: round_cents(amount),
        }
    }
}

/// Rounds to two fractional digits. Values too large to carry cents are returned unchanged.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() || value.abs() >= ROUNDING_LIMIT {
        return value;
    }
    scaled.round() / 100.0
}

/// Next identifier: one past the largest id still present.
pub fn next_id(expenses: &[Expense]) -> Result<i64> {
    expenses
        .iter()
        .map(|e| e.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| {
            ExpenseError::Storage(format!(
                "cannot assign a new id: stored ids already reach {}",
                i64::MAX
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_fields() {
        let expense = Expense::new(3, "2024-01-10", "  Coffee beans ", 3.456);
        assert_eq!(expense.description, "Coffee beans");
        assert_eq!(expense.amount, 3.46);
        assert_eq!(expense.date, "2024-01-10");
    }

    #[test]
    fn next_id_uses_current_maximum() {
        assert_eq!(next_id(&[]).unwrap(), 1);
        let expenses = vec![
            Expense::new(4, "2024-01-01", "a", 1.0),
            Expense::new(2, "2024-01-01", "b", 1.0),
        ];
        assert_eq!(next_id(&expenses).unwrap(), 5);
    }

    #[test]
    fn next_id_fails_instead_of_overflowing() {
        let expenses = vec![Expense::new(i64::MAX, "2024-01-01", "last", 1.0)];
        let err = next_id(&expenses).expect_err("no id left");
        assert!(matches!(err, ExpenseError::Storage(ref msg) if msg.contains("cannot assign")));
    }

    #[test]
    fn huge_amounts_survive_rounding() {
        assert_eq!(round_cents(1e307), 1e307);
        assert_eq!(round_cents(f64::MAX), f64::MAX);
        assert_eq!(round_cents(1e15 + 0.25), 1e15 + 0.25);
        assert_eq!(round_cents(12.345_678), 12.35);
    }

    #[test]
    fn serializes_keys_in_stable_order() {
        let expense = Expense::new(1, "2024-01-10", "Coffee", 3.5);
        let json = serde_json::to_string(&expense).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"date":"2024-01-10","description":"Coffee","amount":3.5}"#
        );
    }
}
