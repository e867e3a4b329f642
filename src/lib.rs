#![doc(test(attr(deny(warnings))))]

//! Cash Projection keeps a single account's ledger: an initial balance plus dated deposits
//! and payments, kept in one canonical order with a running balance projected over time and
//! the lowest balance around today flagged.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod parser;
pub mod search;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("cash projection tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
