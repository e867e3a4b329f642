use std::fmt;

use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current date so projections stay deterministic in tests.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Today's calendar date in the user's time zone.
    fn today(&self) -> NaiveDate;
}

/// Real clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
