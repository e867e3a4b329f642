use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::{
    advance,
    clock::{Clock, SystemClock},
    projection::{self, RecomputeGuard},
    transaction::{Periodicity, Transaction},
};
use crate::errors::LedgerError;

pub const DEFAULT_ACCOUNT_NAME: &str = "My Account";

/// A single field change applied through [`Ledger::edit`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionEdit {
    Name(String),
    Date(NaiveDate),
    Deposit(Option<Decimal>),
    Payment(Option<Decimal>),
    Periodicity(Periodicity),
}

/// An account's initial balance plus its transactions, kept in canonical order with
/// balances projected after every mutation.
#[derive(Debug)]
pub struct Ledger {
    account_name: String,
    initial_balance: Decimal,
    transactions: Vec<Transaction>,
    dirty: bool,
    clock: Arc<dyn Clock>,
    guard: RecomputeGuard,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_NAME, Decimal::ZERO)
    }
}

impl Ledger {
    pub fn new(account_name: impl Into<String>, initial_balance: Decimal) -> Self {
        Self::with_transactions(account_name, initial_balance, Vec::new())
    }

    /// Builds a clean (not dirty) ledger from existing transactions.
    pub fn with_transactions(
        account_name: impl Into<String>,
        initial_balance: Decimal,
        transactions: Vec<Transaction>,
    ) -> Self {
        let mut ledger = Self {
            account_name: account_name.into(),
            initial_balance,
            transactions,
            dirty: false,
            clock: Arc::new(SystemClock),
            guard: RecomputeGuard::default(),
        };
        ledger.recompute();
        ledger
    }

    /// Replaces the clock used for "today" and re-projects.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self.recompute();
        self
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    /// Transactions in canonical order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    /// Position of `id` in canonical order.
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.transactions.iter().position(|txn| txn.id() == id)
    }

    /// The transaction currently flagged as the lowest balance near today, if any.
    pub fn lowest_near_now(&self) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.is_lowest_near_now())
    }

    pub fn set_account_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.account_name != name {
            self.account_name = name;
            self.mark_dirty();
        }
    }

    pub fn set_initial_balance(&mut self, amount: Decimal) {
        if self.initial_balance != amount {
            self.initial_balance = amount;
            self.mark_dirty();
            self.recompute();
        }
    }

    /// Appends a blank monthly transaction dated today and returns its id.
    pub fn add(&mut self) -> Uuid {
        let blank = Transaction::new(String::new(), self.today(), Periodicity::Monthly);
        self.insert(blank)
    }

    /// Appends a fully built transaction and returns its id.
    pub fn insert(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id();
        self.transactions.push(transaction);
        self.mark_dirty();
        self.recompute();
        id
    }

    pub fn edit(&mut self, id: Uuid, edit: TransactionEdit) -> Result<(), LedgerError> {
        let txn = self.transaction_mut(id)?;
        match edit {
            TransactionEdit::Name(name) => txn.name = name,
            TransactionEdit::Date(date) => txn.date = date,
            TransactionEdit::Deposit(amount) => txn.set_deposit(amount),
            TransactionEdit::Payment(amount) => txn.set_payment(amount),
            TransactionEdit::Periodicity(periodicity) => txn.periodicity = periodicity,
        }
        self.mark_dirty();
        self.recompute();
        Ok(())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Transaction, LedgerError> {
        let index = self
            .position(id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        let removed = self.transactions.remove(index);
        self.mark_dirty();
        self.recompute();
        Ok(removed)
    }

    /// Pushes a transaction forward per its periodicity and returns the new date. The ledger
    /// is marked dirty and re-projected even when the date does not change.
    pub fn advance(&mut self, id: Uuid) -> Result<NaiveDate, LedgerError> {
        let current = self.get(id).ok_or(LedgerError::TransactionNotFound(id))?;
        let next = advance::next_date(current, &self.transactions);
        debug!(%id, from = %current.date, to = %next, "advancing transaction");
        self.transaction_mut(id)?.date = next;
        self.mark_dirty();
        self.recompute();
        Ok(next)
    }

    /// Clears the dirty flag after the caller has persisted the ledger.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Re-sorts and re-projects every transaction. A call made while a recompute is already
    /// running is dropped.
    pub fn recompute(&mut self) {
        let Some(_token) = self.guard.try_enter() else {
            debug!("recompute already in progress; request dropped");
            return;
        };
        let today = self.clock.today();
        let current = std::mem::take(&mut self.transactions);
        self.transactions = projection::recompute(self.initial_balance, current, today);
        debug!(
            count = self.transactions.len(),
            %today,
            "ledger recomputed"
        );
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn transaction_mut(&mut self, id: Uuid) -> Result<&mut Transaction, LedgerError> {
        self.transactions
            .iter_mut()
            .find(|txn| txn.id() == id)
            .ok_or(LedgerError::TransactionNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::clock::FixedClock;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger_on(today: NaiveDate) -> Ledger {
        Ledger::new("Checking", dec!(1000)).with_clock(Arc::new(FixedClock(today)))
    }

    #[test]
    fn new_ledger_is_clean() {
        let ledger = Ledger::default();
        assert_eq!(ledger.account_name(), DEFAULT_ACCOUNT_NAME);
        assert_eq!(ledger.initial_balance(), Decimal::ZERO);
        assert!(ledger.is_empty());
        assert!(!ledger.is_dirty());
    }

    #[test]
    fn add_uses_defaults() {
        let today = date(2024, 2, 10);
        let mut ledger = ledger_on(today);
        let id = ledger.add();
        let txn = ledger.get(id).unwrap();
        assert_eq!(txn.name, "");
        assert_eq!(txn.date, today);
        assert_eq!(txn.deposit(), None);
        assert_eq!(txn.payment(), None);
        assert_eq!(txn.periodicity, Periodicity::Monthly);
        assert!(ledger.is_dirty());
        assert!(txn.is_lowest_near_now());
    }

    #[test]
    fn edits_resort_and_reproject() {
        let mut ledger = ledger_on(date(2024, 1, 3));
        let rent = ledger.insert(
            Transaction::new("Rent", date(2024, 1, 1), Periodicity::Monthly)
                .with_payment(dec!(500)),
        );
        let pay = ledger.insert(
            Transaction::new("Paycheck", date(2024, 1, 5), Periodicity::TwoWeeksPastLast)
                .with_deposit(dec!(800)),
        );
        assert_eq!(ledger.transactions()[1].balance(), dec!(1300));

        ledger
            .edit(rent, TransactionEdit::Date(date(2024, 1, 9)))
            .unwrap();
        assert_eq!(ledger.position(pay), Some(0));
        assert_eq!(ledger.get(pay).unwrap().balance(), dec!(1800));
        assert_eq!(ledger.get(rent).unwrap().balance(), dec!(1300));

        ledger
            .edit(rent, TransactionEdit::Deposit(Some(dec!(0))))
            .unwrap();
        let rent_txn = ledger.get(rent).unwrap();
        assert_eq!(rent_txn.deposit(), None);
        assert_eq!(rent_txn.payment(), Some(Decimal::ZERO));
        assert_eq!(rent_txn.balance(), dec!(1800));
    }

    #[test]
    fn delete_removes_by_identity() {
        let mut ledger = ledger_on(date(2024, 1, 1));
        let first = ledger.add();
        let second = ledger.add();
        ledger.mark_saved();

        let removed = ledger.delete(first).unwrap();
        assert_eq!(removed.id(), first);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(second).is_some());
        assert!(ledger.is_dirty());
        assert_eq!(
            ledger.delete(first),
            Err(LedgerError::TransactionNotFound(first))
        );
    }

    #[test]
    fn advance_always_marks_dirty_and_recomputes() {
        let mut ledger = ledger_on(date(2024, 1, 20));
        let lone = ledger.insert(
            Transaction::new("Gym", date(2024, 1, 20), Periodicity::TwoWeeksPastLast)
                .with_payment(dec!(30)),
        );
        ledger.mark_saved();

        assert_eq!(ledger.advance(lone).unwrap(), date(2024, 1, 20));
        assert!(ledger.is_dirty());
        assert!(ledger.get(lone).unwrap().is_lowest_near_now());
    }

    #[test]
    fn advance_moves_monthly_entry_out_of_order() {
        let mut ledger = ledger_on(date(2024, 1, 15));
        let bill = ledger.insert(
            Transaction::new("Phone", date(2024, 1, 31), Periodicity::Monthly)
                .with_payment(dec!(60)),
        );
        let later = ledger.insert(Transaction::new(
            "Note",
            date(2024, 2, 10),
            Periodicity::NotApplicable,
        ));

        assert_eq!(ledger.advance(bill).unwrap(), date(2024, 2, 29));
        assert_eq!(ledger.position(later), Some(0));
        assert_eq!(ledger.position(bill), Some(1));
    }

    #[test]
    fn initial_balance_change_reprojects() {
        let mut ledger = ledger_on(date(2024, 1, 1));
        let id = ledger.insert(
            Transaction::new("Fee", date(2024, 1, 2), Periodicity::NotApplicable)
                .with_payment(dec!(5)),
        );
        ledger.mark_saved();
        ledger.set_initial_balance(dec!(20));
        assert!(ledger.is_dirty());
        assert_eq!(ledger.get(id).unwrap().balance(), dec!(15));
    }

    #[test]
    fn renaming_account_only_dirties_on_change() {
        let mut ledger = ledger_on(date(2024, 1, 1));
        ledger.set_account_name("Checking");
        assert!(!ledger.is_dirty());
        ledger.set_account_name("Savings");
        assert!(ledger.is_dirty());
        ledger.mark_saved();
        assert!(!ledger.is_dirty());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut ledger = Ledger::default();
        let missing = Uuid::new_v4();
        assert_eq!(
            ledger.edit(missing, TransactionEdit::Name("x".into())),
            Err(LedgerError::TransactionNotFound(missing))
        );
        assert_eq!(
            ledger.advance(missing),
            Err(LedgerError::TransactionNotFound(missing))
        );
    }
}
