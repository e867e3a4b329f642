use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar::add_months;

/// Display severity of a projected balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Healthy,
    Warning,
    Danger,
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BalanceStatus::Healthy => "healthy",
            BalanceStatus::Warning => "warning",
            BalanceStatus::Danger => "danger",
        };
        f.write_str(label)
    }
}

/// Balance levels at which projections are flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceThresholds {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub danger: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub warning: Decimal,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            danger: Decimal::from(500),
            warning: Decimal::from(2000),
        }
    }
}

impl BalanceThresholds {
    /// `Danger` at or below the danger level, `Warning` strictly below the warning level.
    pub fn classify(&self, balance: Decimal) -> BalanceStatus {
        if balance <= self.danger {
            BalanceStatus::Danger
        } else if balance < self.warning {
            BalanceStatus::Warning
        } else {
            BalanceStatus::Healthy
        }
    }
}

/// True when `date` falls after the one-month horizon from `today`.
pub fn is_beyond_horizon(date: NaiveDate, today: NaiveDate) -> bool {
    date > add_months(today, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn classifies_against_default_thresholds() {
        let thresholds = BalanceThresholds::default();
        assert_eq!(thresholds.classify(dec!(-10)), BalanceStatus::Danger);
        assert_eq!(thresholds.classify(dec!(500)), BalanceStatus::Danger);
        assert_eq!(thresholds.classify(dec!(500.01)), BalanceStatus::Warning);
        assert_eq!(thresholds.classify(dec!(1999.99)), BalanceStatus::Warning);
        assert_eq!(thresholds.classify(dec!(2000)), BalanceStatus::Healthy);
    }

    #[test]
    fn horizon_is_one_calendar_month() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert!(!is_beyond_horizon(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), today));
        assert!(is_beyond_horizon(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), today));
    }
}
