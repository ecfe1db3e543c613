//! Error types for mra.

use thiserror::Error;

/// Top-level result type for mra operations.
pub type Result<T> = std::result::Result<T, MraError>;

/// Top-level error type for mra.
#[derive(Debug, Error)]
pub enum MraError {
    #[error("vault error: {0}")]
    Vault(String),

    #[error("ledger error: {0}")]
    Ledger(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("pipeline error: {0}")]
    Pipeline(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
