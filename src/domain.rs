//! Error vocabulary shared by the core operations.
//!
//! Four domain failure kinds plus store failures. All are terminal to
//! the operation — nothing is retried here; the API layer maps each to
//! a distinct response.

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed identifier, missing required field, unknown enum value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity absent — or deliberately hidden by the visibility rules.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The actor lacks the relationship required for this access.
    #[error("Not authorized")]
    Unauthorized,

    /// The actor's role does not permit the requested status target.
    #[error("{0}")]
    ForbiddenTransition(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
