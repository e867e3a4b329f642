//! Canonical transaction order shared by display and balance accumulation.

use std::cmp::Ordering;

use super::transaction::Transaction;

/// Date ascending, then payments before everything else on the same day, then name
/// (case-insensitive), then effective amount.
pub fn compare(a: &Transaction, b: &Transaction) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| b.payment().is_some().cmp(&a.payment().is_some()))
        .then_with(|| compare_names(&a.name, &b.name))
        .then_with(|| a.effective_amount().cmp(&b.effective_amount()))
}

pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Returns the transactions in canonical order. Equal entries keep their input order.
pub fn sort_canonical(transactions: impl IntoIterator<Item = Transaction>) -> Vec<Transaction> {
    let mut ordered: Vec<Transaction> = transactions.into_iter().collect();
    ordered.sort_by(compare);
    ordered
}

pub fn is_canonical(transactions: &[Transaction]) -> bool {
    transactions
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Periodicity;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn on(day: u32, name: &str) -> Transaction {
        Transaction::new(
            name,
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            Periodicity::NotApplicable,
        )
    }

    #[test]
    fn earlier_dates_sort_first() {
        let a = on(1, "Zeta").with_deposit(dec!(10));
        let b = on(2, "Alpha").with_payment(dec!(10));
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn payments_precede_deposits_on_same_day() {
        let deposit = on(3, "Alpha").with_deposit(dec!(1));
        let payment = on(3, "Zeta").with_payment(dec!(999));
        assert_eq!(compare(&payment, &deposit), Ordering::Less);
    }

    #[test]
    fn zero_payment_placeholder_counts_as_payment() {
        let placeholder = on(3, "Zeta").with_deposit(dec!(0));
        let unset = on(3, "Alpha");
        assert_eq!(compare(&placeholder, &unset), Ordering::Less);
    }

    #[test]
    fn names_compare_case_insensitively_then_amount() {
        let lower = on(4, "rent").with_payment(dec!(900));
        let upper = on(4, "Rent").with_payment(dec!(100));
        assert_eq!(compare_names("rent", "RENT"), Ordering::Equal);
        assert_eq!(compare(&upper, &lower), Ordering::Less);
        assert_eq!(compare(&on(4, "apple"), &on(4, "Banana")), Ordering::Less);
    }

    #[test]
    fn sorting_is_idempotent() {
        let input = vec![
            on(9, "b").with_deposit(dec!(5)),
            on(1, "a").with_payment(dec!(2)),
            on(9, "a").with_payment(dec!(1)),
            on(1, "a").with_deposit(dec!(2)),
        ];
        let once = sort_canonical(input);
        assert!(is_canonical(&once));
        let twice = sort_canonical(once.clone());
        assert_eq!(once, twice);
    }
}
