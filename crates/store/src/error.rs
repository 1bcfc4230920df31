use thiserror::Error;

/// Errors surfaced by the store boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// A referential-integrity rule blocks the change (e.g. deleting an
    /// article that movements still reference).
    #[error("referential integrity: {0}")]
    ReferentialIntegrity(String),

    /// The backing store failed; opaque to the caller (network, lock
    /// poisoning, remote errors).
    #[error("store backend failure: {0}")]
    Backend(String),
}
