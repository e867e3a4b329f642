use chrono::NaiveDate;
use tracing::debug;

use super::{
    calendar::{add_days, add_months, add_years},
    transaction::{Periodicity, Transaction},
};

/// Days after the previous same-named entry for [`Periodicity::TwoWeeksPastLast`].
pub const TWO_WEEKS_DAYS: u64 = 14;

/// Computes the date `transaction` moves to when pushed forward.
///
/// `all` is the full transaction set; it is only consulted for
/// [`Periodicity::TwoWeeksPastLast`], which anchors on the latest *other* entry sharing the
/// same name. When no such entry exists, or the periodicity is
/// [`Periodicity::NotApplicable`], the date is returned unchanged.
pub fn next_date(transaction: &Transaction, all: &[Transaction]) -> NaiveDate {
    let current = transaction.date;
    match transaction.periodicity {
        Periodicity::NotApplicable => current,
        Periodicity::Monthly => add_months(current, 1),
        Periodicity::Quarterly => add_months(current, 3),
        Periodicity::SemiAnnually => add_months(current, 6),
        Periodicity::Annually => add_years(current, 1),
        Periodicity::TwoWeeksPastLast => match latest_namesake(transaction, all) {
            Some(previous) => add_days(previous.date, TWO_WEEKS_DAYS),
            None => {
                debug!(name = %transaction.name, "no earlier namesake; date unchanged");
                current
            }
        },
    }
}

fn latest_namesake<'a>(transaction: &Transaction, all: &'a [Transaction]) -> Option<&'a Transaction> {
    all.iter()
        .filter(|other| other.id() != transaction.id() && other.name == transaction.name)
        .max_by_key(|other| other.date)
}
