//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: i32 },

    /// Nothing stored at all, reported only where the caller treats it as an error.
    #[error("no {0}s found")]
    NoRows(&'static str),

    #[error("{0}")]
    Validation(String),

    /// The database refused to modify the row (SQLSTATE 2F002).
    #[error("modification not permitted: {0}")]
    ModificationNotPermitted(String),

    #[error("{0}")]
    Internal(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("modifying data not permitted: {0}")]
    ModificationNotPermitted(String),
}
