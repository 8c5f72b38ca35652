//! Amount formatting with thousands grouping.

pub const DEFAULT_SYMBOL: &str = "₱";
const PRECISION: usize = 2;
const GROUPING_SEPARATOR: char = ',';

/// Formats `value` with two decimals and comma-grouped thousands, e.g. `1,234.50`.
pub fn format_number(value: f64) -> String {
    let body = format!("{:.*}", PRECISION, value);
    let (int_part, frac_part) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits)),
        None => group_digits(int_part),
    };
    format!("{}{}", grouped, frac_part)
}

/// Prefixes the currency symbol, keeping a minus sign in front of it.
pub fn format_currency(value: f64, symbol: &str) -> String {
    if value < 0.0 {
        format!("-{}{}", symbol, format_number(value.abs()))
    } else {
        format!("{}{}", symbol, format_number(value))
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}
