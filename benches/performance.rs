use std::sync::Arc;

use cash_projection::ledger::{projection, FixedClock, Ledger, Periodicity, Transaction};
use cash_projection::storage::{JsonFileStore, LedgerSnapshot, PersistenceGateway};
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;

const NAMES: [&str; 6] = ["Rent", "Paycheck", "Groceries", "Phone", "Insurance", "Gym"];

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

fn build_transactions(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|idx| {
            let date = start_date() + Days::new((idx % 365) as u64);
            let periodicity = Periodicity::ALL[idx % Periodicity::ALL.len()];
            let txn = Transaction::new(NAMES[idx % NAMES.len()], date, periodicity);
            let amount = Decimal::new(5_000 + (idx % 100) as i64 * 25, 2);
            if idx % 4 == 0 {
                txn.with_deposit(amount * Decimal::TEN)
            } else {
                txn.with_payment(amount)
            }
        })
        .collect()
}

fn bench_recompute(c: &mut Criterion) {
    let transactions = build_transactions(black_box(10_000));
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");

    c.bench_function("recompute_10k", |b| {
        b.iter_batched(
            || transactions.clone(),
            |txns| black_box(projection::recompute(Decimal::ONE_THOUSAND, txns, today)),
            BatchSize::LargeInput,
        )
    });

    let build = || {
        Ledger::with_transactions("Benchmark", Decimal::ONE_THOUSAND, transactions.clone())
            .with_clock(Arc::new(FixedClock(today)))
    };
    let target = transactions[transactions.len() / 2].id();
    c.bench_function("advance_10k", |b| {
        b.iter_batched(
            &build,
            |mut ledger| black_box(ledger.advance(target).expect("advance")),
            BatchSize::LargeInput,
        )
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let ledger = Ledger::with_transactions(
        "Benchmark",
        Decimal::ONE_THOUSAND,
        build_transactions(black_box(10_000)),
    );
    let snapshot = LedgerSnapshot::from(&ledger);
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("CashProjection.json"));

    c.bench_function("snapshot_save_10k", |b| {
        b.iter(|| store.save(&snapshot).expect("save snapshot"))
    });

    store.save(&snapshot).expect("seed");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| {
            let loaded = store.load().expect("load snapshot");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_recompute, bench_snapshot_io);
criterion_main!(benches);
