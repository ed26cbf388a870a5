//! Error type shared by the ledger and the slot stores.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("No workout with id {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LedgerError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
