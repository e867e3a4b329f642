pub mod advance;
pub mod calendar;
pub mod clock;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod ordering;
pub mod projection;
pub mod status;
pub mod transaction;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger::{Ledger, TransactionEdit, DEFAULT_ACCOUNT_NAME};
pub use status::{BalanceStatus, BalanceThresholds};
pub use transaction::{Periodicity, Transaction};
