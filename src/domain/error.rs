//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the region registry invariants.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("region already registered: {0}")]
    DuplicateRegion(String),

    #[error("unknown parent node for region: {0}")]
    UnknownParent(String),

    #[error("cannot encode snapshot: {message}")]
    SnapshotEncode { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
