use chrono::{Days, Months, NaiveDate};

/// Shifts `date` by whole calendar months, clamping the day to the end of the target month.
/// Dates outside chrono's range are returned unchanged.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let span = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(span)
    } else {
        date.checked_sub_months(span)
    };
    shifted.unwrap_or(date)
}

/// Shifts `date` by whole years; Feb 29 lands on Feb 28 in non-leap years.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, years.saturating_mul(12))
}

pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The window spanning `months` calendar months either side of `center`.
    pub fn around(center: NaiveDate, months: i32) -> Self {
        Self {
            start: add_months(center, -months),
            end: add_months(center, months),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
