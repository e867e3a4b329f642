use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Clock, Ledger, Periodicity, Transaction, DEFAULT_ACCOUNT_NAME};

/// Persisted form of a ledger. Derived values (balances, the lowest-near-now marker and
/// transaction ids) are never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LedgerSnapshot {
    #[serde(default = "default_account_name")]
    pub account_name: String,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub initial_balance: Decimal,
    #[serde(default)]
    pub transactions: Vec<TransactionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(with = "snapshot_date")]
    pub transaction_date: NaiveDate,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub deposit: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub payment: Option<Decimal>,
    #[serde(default)]
    pub periodicity: Periodicity,
}

fn default_account_name() -> String {
    DEFAULT_ACCOUNT_NAME.to_string()
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            account_name: default_account_name(),
            initial_balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }
}

impl LedgerSnapshot {
    /// Restores a clean ledger. Amounts are taken verbatim so a stored zero payment
    /// placeholder survives the round trip.
    pub fn into_ledger(self, clock: Arc<dyn Clock>) -> Ledger {
        let transactions = self
            .transactions
            .into_iter()
            .map(TransactionSnapshot::into_transaction)
            .collect();
        Ledger::with_transactions(self.account_name, self.initial_balance, transactions)
            .with_clock(clock)
    }
}

impl From<&Ledger> for LedgerSnapshot {
    fn from(ledger: &Ledger) -> Self {
        Self {
            account_name: ledger.account_name().to_string(),
            initial_balance: ledger.initial_balance(),
            transactions: ledger
                .transactions()
                .iter()
                .map(TransactionSnapshot::from)
                .collect(),
        }
    }
}

impl TransactionSnapshot {
    pub fn into_transaction(self) -> Transaction {
        Transaction::from_parts(
            self.name,
            self.transaction_date,
            self.deposit,
            self.payment,
            self.periodicity,
        )
    }
}

impl From<&Transaction> for TransactionSnapshot {
    fn from(txn: &Transaction) -> Self {
        Self {
            name: txn.name.clone(),
            transaction_date: txn.date,
            deposit: txn.deposit(),
            payment: txn.payment(),
            periodicity: txn.periodicity,
        }
    }
}

/// Dates are written as `YYYY-MM-DD`. Reading also accepts full timestamps (with or
/// without an offset); the time of day is discarded.
mod snapshot_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        NaiveDate::parse_from_str(trimmed, FORMAT)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|stamp| stamp.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|stamp| stamp.date_naive())
            })
    }
}
