//! Running-balance projection and the lowest-balance-near-today marker.

use std::cell::Cell;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{calendar::DateWindow, ordering::sort_canonical, transaction::Transaction};

/// Months either side of today searched for the lowest projected balance.
pub const NEAR_NOW_MONTHS: i32 = 1;

/// Orders `transactions` canonically and annotates each with its running balance and the
/// lowest-near-now marker. Running balances saturate at the `Decimal` bounds.
///
/// The marker goes to the first transaction (in canonical order) holding the minimum
/// balance among those dated within [`NEAR_NOW_MONTHS`] of `today`. Nothing is marked when
/// that window is empty.
pub fn recompute(
    initial_balance: Decimal,
    transactions: impl IntoIterator<Item = Transaction>,
    today: NaiveDate,
) -> Vec<Transaction> {
    let mut ordered = sort_canonical(transactions);

    let mut running = initial_balance;
    for txn in ordered.iter_mut() {
        running = running.saturating_add(txn.balance_effect());
        txn.set_projection(running, false);
    }

    if let Some(index) = lowest_near_now(&ordered, today) {
        ordered[index].mark_lowest_near_now();
    }
    ordered
}

/// Index of the first minimum-balance transaction inside the near-now window.
pub fn lowest_near_now(ordered: &[Transaction], today: NaiveDate) -> Option<usize> {
    let window = DateWindow::around(today, NEAR_NOW_MONTHS);
    let mut lowest: Option<(usize, Decimal)> = None;
    for (index, txn) in ordered.iter().enumerate() {
        if !window.contains(txn.date) {
            continue;
        }
        match lowest {
            Some((_, min)) if min <= txn.balance() => {}
            _ => lowest = Some((index, txn.balance())),
        }
    }
    lowest.map(|(index, _)| index)
}

/// Drops recompute requests that arrive while one is already running.
#[derive(Debug, Default)]
pub struct RecomputeGuard {
    active: Cell<bool>,
}

impl RecomputeGuard {
    /// Enters the guarded section, or returns `None` when it is already held.
    pub fn try_enter(&self) -> Option<RecomputeToken<'_>> {
        if self.active.replace(true) {
            return None;
        }
        Some(RecomputeToken { guard: self })
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Releases the guard on drop.
#[derive(Debug)]
pub struct RecomputeToken<'a> {
    guard: &'a RecomputeGuard,
}

impl Drop for RecomputeToken<'_> {
    fn drop(&mut self) {
        self.guard.active.set(false);
    }
}
