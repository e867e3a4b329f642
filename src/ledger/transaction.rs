use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{
    de::{self, Deserializer, Visitor},
    Deserialize, Serialize,
};
use uuid::Uuid;

use crate::errors::FormatError;

/// How a transaction repeats when it is pushed forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Periodicity {
    #[default]
    NotApplicable,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    TwoWeeksPastLast,
}

impl Periodicity {
    /// Every variant, in persisted index order.
    pub const ALL: [Periodicity; 6] = [
        Periodicity::NotApplicable,
        Periodicity::Monthly,
        Periodicity::Quarterly,
        Periodicity::SemiAnnually,
        Periodicity::Annually,
        Periodicity::TwoWeeksPastLast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Periodicity::NotApplicable => "NotApplicable",
            Periodicity::Monthly => "Monthly",
            Periodicity::Quarterly => "Quarterly",
            Periodicity::SemiAnnually => "SemiAnnually",
            Periodicity::Annually => "Annually",
            Periodicity::TwoWeeksPastLast => "TwoWeeksPastLast",
        }
    }

    pub fn from_index(index: u64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts variant names case-insensitively, or the numeric variant index.
impl FromStr for Periodicity {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(index) = trimmed.parse::<u64>() {
            return Periodicity::from_index(index)
                .ok_or_else(|| FormatError::Periodicity(trimmed.to_string()));
        }
        Periodicity::ALL
            .into_iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FormatError::Periodicity(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for Periodicity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PeriodicityVisitor;

        impl Visitor<'_> for PeriodicityVisitor {
            type Value = Periodicity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a periodicity name or index")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Periodicity, E> {
                value.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Periodicity, E> {
                Periodicity::from_index(value)
                    .ok_or_else(|| E::custom(FormatError::Periodicity(value.to_string())))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Periodicity, E> {
                u64::try_from(value)
                    .ok()
                    .and_then(Periodicity::from_index)
                    .ok_or_else(|| E::custom(FormatError::Periodicity(value.to_string())))
            }
        }

        deserializer.deserialize_any(PeriodicityVisitor)
    }
}

/// A single ledger entry.
///
/// `deposit` and `payment` are kept private so that every change goes through
/// [`Transaction::set_deposit`] / [`Transaction::set_payment`], which enforce that at most one
/// of them carries an effective amount. `balance` and `is_lowest_near_now` are derived by
/// [`crate::ledger::projection::recompute`] and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    deposit: Option<Decimal>,
    payment: Option<Decimal>,
    pub periodicity: Periodicity,
    balance: Decimal,
    is_lowest_near_now: bool,
}

impl Transaction {
    pub fn new(name: impl Into<String>, date: NaiveDate, periodicity: Periodicity) -> Self {
        Self::from_parts(name, date, None, None, periodicity)
    }

    /// Builds a transaction with amounts taken verbatim, e.g. when restoring a snapshot.
    pub fn from_parts(
        name: impl Into<String>,
        date: NaiveDate,
        deposit: Option<Decimal>,
        payment: Option<Decimal>,
        periodicity: Periodicity,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date,
            deposit,
            payment,
            periodicity,
            balance: Decimal::ZERO,
            is_lowest_near_now: false,
        }
    }

    pub fn with_deposit(mut self, amount: Decimal) -> Self {
        self.set_deposit(Some(amount));
        self
    }

    pub fn with_payment(mut self, amount: Decimal) -> Self {
        self.set_payment(Some(amount));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn deposit(&self) -> Option<Decimal> {
        self.deposit
    }

    pub fn payment(&self) -> Option<Decimal> {
        self.payment
    }

    /// Running balance after this transaction, as of the last recompute.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_lowest_near_now(&self) -> bool {
        self.is_lowest_near_now
    }

    /// Sets the deposit. A zero deposit is stored as a zero payment placeholder; any other
    /// value clears the payment.
    pub fn set_deposit(&mut self, amount: Option<Decimal>) {
        match amount {
            Some(value) if value.is_zero() => {
                self.deposit = None;
                self.payment = Some(Decimal::ZERO);
            }
            Some(value) => {
                self.deposit = Some(value);
                self.payment = None;
            }
            None => self.deposit = None,
        }
    }

    /// Sets the payment, clearing the deposit whenever a value is present.
    pub fn set_payment(&mut self, amount: Option<Decimal>) {
        if amount.is_some() {
            self.deposit = None;
        }
        self.payment = amount;
    }

    /// Payment if set, else deposit, else zero.
    pub fn effective_amount(&self) -> Decimal {
        self.payment.or(self.deposit).unwrap_or(Decimal::ZERO)
    }

    /// Signed change this transaction applies to the running balance.
    pub fn balance_effect(&self) -> Decimal {
        match (self.deposit, self.payment) {
            (Some(deposit), _) if !deposit.is_zero() => deposit,
            (_, Some(payment)) if !payment.is_zero() => -payment,
            _ => Decimal::ZERO,
        }
    }

    pub(crate) fn set_projection(&mut self, balance: Decimal, is_lowest_near_now: bool) {
        self.balance = balance;
        self.is_lowest_near_now = is_lowest_near_now;
    }

    pub(crate) fn mark_lowest_near_now(&mut self) {
        self.is_lowest_near_now = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Transaction {
        Transaction::new(
            "Groceries",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Periodicity::Monthly,
        )
    }

    #[test]
    fn payment_replaces_deposit() {
        let mut txn = sample();
        txn.set_deposit(Some(dec!(100)));
        txn.set_payment(Some(dec!(50)));
        assert_eq!(txn.deposit(), None);
        assert_eq!(txn.payment(), Some(dec!(50)));
    }

    #[test]
    fn deposit_replaces_payment() {
        let mut txn = sample().with_payment(dec!(20));
        txn.set_deposit(Some(dec!(75)));
        assert_eq!(txn.deposit(), Some(dec!(75)));
        assert_eq!(txn.payment(), None);
    }

    #[test]
    fn zero_deposit_becomes_zero_payment_placeholder() {
        let mut txn = sample().with_deposit(dec!(10));
        txn.set_deposit(Some(Decimal::ZERO));
        assert_eq!(txn.deposit(), None);
        assert_eq!(txn.payment(), Some(Decimal::ZERO));
        assert_eq!(txn.balance_effect(), Decimal::ZERO);
    }

    #[test]
    fn clearing_deposit_leaves_payment_alone() {
        let mut txn = sample().with_payment(dec!(30));
        txn.set_deposit(None);
        assert_eq!(txn.payment(), Some(dec!(30)));
    }

    #[test]
    fn balance_effect_is_signed() {
        assert_eq!(sample().with_deposit(dec!(12.5)).balance_effect(), dec!(12.5));
        assert_eq!(sample().with_payment(dec!(12.5)).balance_effect(), dec!(-12.5));
        assert_eq!(sample().balance_effect(), Decimal::ZERO);
    }

    #[test]
    fn periodicity_parses_names_and_indices() {
        assert_eq!("monthly".parse::<Periodicity>(), Ok(Periodicity::Monthly));
        assert_eq!(
            " TwoWeeksPastLast ".parse::<Periodicity>(),
            Ok(Periodicity::TwoWeeksPastLast)
        );
        assert_eq!("4".parse::<Periodicity>(), Ok(Periodicity::Annually));
        assert_eq!(
            "weekly".parse::<Periodicity>(),
            Err(FormatError::Periodicity("weekly".into()))
        );
        assert!("6".parse::<Periodicity>().is_err());
    }

    #[test]
    fn periodicity_deserializes_from_name_or_number() {
        let named: Periodicity = serde_json::from_str("\"SemiAnnually\"").unwrap();
        let numbered: Periodicity = serde_json::from_str("5").unwrap();
        assert_eq!(named, Periodicity::SemiAnnually);
        assert_eq!(numbered, Periodicity::TwoWeeksPastLast);
        assert_eq!(
            serde_json::to_string(&Periodicity::Quarterly).unwrap(),
            "\"Quarterly\""
        );
    }
}
