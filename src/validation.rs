//! Side-effect free predicates guarding every ledger mutation.

use chrono::NaiveDate;

/// Storage and input format for expense dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Finite and non-negative.
pub fn valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Between 1 and [`MAX_DESCRIPTION_LEN`] characters once surrounding whitespace is trimmed.
pub fn valid_description(description: &str) -> bool {
    let len = description.trim().chars().count();
    (1..=MAX_DESCRIPTION_LEN).contains(&len)
}

pub fn valid_id(id: i64) -> bool {
    id > 0
}

/// Accepts only zero-padded `YYYY-MM-DD` strings naming a real calendar day.
pub fn valid_date(date: &str) -> bool {
    parse_date(date).is_some()
}

/// Parses a stored or user supplied date, enforcing the fixed ten character layout.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let bytes = date.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(idx, byte)| match idx {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}
