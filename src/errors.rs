use std::{io, path::PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Failures raised by ledger lookups and mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
}

/// Rejections produced while parsing a free-text `Name, Date, Amount, Periodicity` entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("entry cannot be empty")]
    Empty,
    #[error("expected 4 comma-separated values: 'Name, Date, Amount, Periodicity'; got {found}")]
    FieldCount { found: usize },
    #[error("couldn't parse date: '{0}'")]
    Date(String),
    #[error("couldn't parse amount: '{0}'")]
    Amount(String),
    #[error("couldn't parse periodicity: '{0}'")]
    Periodicity(String),
}

impl FormatError {
    /// Name of the entry field that failed, when the failure is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FormatError::Empty | FormatError::FieldCount { .. } => None,
            FormatError::Date(_) => Some("date"),
            FormatError::Amount(_) => Some("amount"),
            FormatError::Periodicity(_) => Some("periodicity"),
        }
    }
}

/// Failures reading a persisted ledger snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed snapshot `{path}`: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures writing a ledger snapshot.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("unable to write `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures loading or storing the user configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
