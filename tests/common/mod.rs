#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use cash_projection::ledger::{Clock, FixedClock, Periodicity, Transaction};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Keeps TempDir guards alive for the whole test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn clock_on(y: i32, m: u32, d: u32) -> Arc<dyn Clock> {
    Arc::new(FixedClock(date(y, m, d)))
}

pub fn payment(name: &str, on: NaiveDate, amount: Decimal, periodicity: Periodicity) -> Transaction {
    Transaction::new(name, on, periodicity).with_payment(amount)
}

pub fn deposit(name: &str, on: NaiveDate, amount: Decimal, periodicity: Periodicity) -> Transaction {
    Transaction::new(name, on, periodicity).with_deposit(amount)
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, contents).expect("write file");
}
