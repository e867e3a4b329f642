//! Single-line transaction entry: `Name, Date, Amount, Periodicity`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    errors::FormatError,
    ledger::{Periodicity, Transaction},
};

/// Date layouts accepted for the date field, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// Parses a comma-separated entry into a transaction.
///
/// A non-negative amount becomes a deposit; a negative amount becomes a payment of its
/// absolute value. Amounts go through the regular setters, so a zero amount is stored as
/// the zero-payment placeholder.
pub fn parse_entry(line: &str) -> Result<Transaction, FormatError> {
    if line.trim().is_empty() {
        return Err(FormatError::Empty);
    }

    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[name, date_text, amount_text, periodicity_text] = parts.as_slice() else {
        return Err(FormatError::FieldCount { found: parts.len() });
    };

    let date = parse_date(date_text)?;
    let amount = parse_amount(amount_text)?;
    let periodicity = Periodicity::from_str(periodicity_text)?;

    let mut txn = Transaction::new(name, date, periodicity);
    if amount.is_sign_negative() && !amount.is_zero() {
        txn.set_payment(Some(amount.abs()));
    } else {
        txn.set_deposit(Some(amount));
    }
    Ok(txn)
}

pub fn parse_date(text: &str) -> Result<NaiveDate, FormatError> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| FormatError::Date(trimmed.to_string()))
}

/// Decimal amount with an optional leading sign.
pub fn parse_amount(text: &str) -> Result<Decimal, FormatError> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if unsigned.is_empty() || (unsigned != trimmed && unsigned.starts_with(['+', '-'])) {
        return Err(FormatError::Amount(trimmed.to_string()));
    }
    Decimal::from_str(unsigned).map_err(|_| FormatError::Amount(trimmed.to_string()))
}
