use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::{LedgerSnapshot, PersistenceGateway};
use crate::{
    errors::{LoadError, SaveError},
    utils::persistence::write_atomic,
};

/// Stores a ledger snapshot as indented JSON in a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceGateway for JsonFileStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, LoadError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot on disk");
                return Ok(None);
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let snapshot =
            serde_json::from_str(&data).map_err(|source| LoadError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&self.path, &json).map_err(|source| SaveError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(
            path = %self.path.display(),
            transactions = snapshot.transactions.len(),
            "ledger saved"
        );
        Ok(())
    }
}
