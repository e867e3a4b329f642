//! Snapshot persistence for a single ledger.

pub mod json_backend;
pub mod snapshot;
pub mod startup;

use crate::errors::{LoadError, SaveError};

/// A backend able to read and write one ledger snapshot.
///
/// `load` yields `Ok(None)` when nothing has been stored yet, which callers treat
/// differently from a snapshot that exists but cannot be read.
pub trait PersistenceGateway {
    fn load(&self) -> Result<Option<LedgerSnapshot>, LoadError>;
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), SaveError>;
}

pub use json_backend::JsonFileStore;
pub use snapshot::{LedgerSnapshot, TransactionSnapshot};
pub use startup::{load_or_default, save_ledger, LoadSource, StartupLedger};
