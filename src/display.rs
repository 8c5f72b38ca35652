//! Text rendering for expense tables and summary totals.

use chrono::Month;

use crate::{currency::format_currency, ledger::Expense};

const COLUMN_PADDING: usize = 2;
pub const EMPTY_MESSAGE: &str = "No expenses found.";

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug)]
struct Column {
    header: &'static str,
    header_alignment: Alignment,
    cell_alignment: Alignment,
}

const COLUMNS: [Column; 4] = [
    Column {
        header: "ID",
        header_alignment: Alignment::Left,
        cell_alignment: Alignment::Left,
    },
    Column {
        header: "Date",
        header_alignment: Alignment::Left,
        cell_alignment: Alignment::Left,
    },
    Column {
        header: "Description",
        header_alignment: Alignment::Left,
        cell_alignment: Alignment::Left,
    },
    Column {
        header: "Amount",
        header_alignment: Alignment::Center,
        cell_alignment: Alignment::Right,
    },
];

/// Renders expenses as a fixed-width table sized to its content.
pub fn render_expenses(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let rows: Vec<[String; 4]> = expenses
        .iter()
        .map(|expense| {
            [
                expense.id.to_string(),
                expense.date.clone(),
                expense.description.clone(),
                format_currency(expense.amount, symbol),
            ]
        })
        .collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            rows.iter()
                .map(|row| visible_width(&row[idx]))
                .fold(visible_width(column.header), usize::max)
                + COLUMN_PADDING
        })
        .collect();
    let rule = "-".repeat(widths.iter().sum());

    let header: String = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(column, width)| render_cell(column.header, *width, column.header_alignment))
        .collect();

    let mut lines = vec![rule.clone(), header, rule.clone()];
    for row in &rows {
        let line: String = COLUMNS
            .iter()
            .zip(&widths)
            .zip(row)
            .map(|((column, width), cell)| render_cell(cell, *width, column.cell_alignment))
            .collect();
        lines.push(line);
    }
    lines.push(rule);
    lines.join("\n")
}

/// Renders the labelled total for `month`, or reports a month outside 1..=12.
pub fn render_summary(total: f64, month: Option<u32>, symbol: &str) -> String {
    let amount = format!("{}{}", symbol, format_total(total));
    match month {
        None => format!("Total expenses: {}", amount),
        Some(number) => match month_name(number) {
            Some(name) => format!("Total expenses for {}: {}", name, amount),
            None => format!("Invalid month: {}", number),
        },
    }
}

/// English month name for a 1-based month number.
pub fn month_name(number: u32) -> Option<&'static str> {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|month| month.name())
}

/// Totals of 1e16 and above switch to exponent notation, e.g. `1.5e+16`.
const EXPONENT_THRESHOLD: f64 = 1e16;

fn format_total(total: f64) -> String {
    if total.is_finite() && total.abs() >= EXPONENT_THRESHOLD {
        let scientific = format!("{:e}", total);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        };
    }
    if total.fract() == 0.0 {
        format!("{:.1}", total)
    } else {
        total.to_string()
    }
}

/// Renders a single cell with alignment applied.
pub fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let remaining = width.saturating_sub(visible_width(text));
    let (left, right) = match alignment {
        Alignment::Left => (0, remaining),
        Alignment::Right => (remaining, 0),
        Alignment::Center => (remaining / 2, remaining - remaining / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn visible_width(text: &str) -> usize {
    text.chars().count()
}
