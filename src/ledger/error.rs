use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger not found at {0}")]
    LedgerMissing(PathBuf),

    #[error("ledger has no date-keyed sections")]
    NoDatedSections,

    #[error("section {0} has no address column")]
    NoAddressColumn(String),

    #[error("no section with date key {0}")]
    SectionNotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
