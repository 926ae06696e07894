//! Domain error taxonomy.
//!
//! Every failure in the service maps onto one of these variants; the API
//! layer translates them into HTTP responses. Nothing here is fatal to the
//! process -- each error is scoped to a single operation.

use crate::types::DbId;

/// Domain-level error type shared across all crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist (or is not visible to the caller).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The request was well-formed but semantically invalid.
    #[error("{0}")]
    Validation(String),

    /// The request conflicts with existing state (e.g. unique constraint).
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to perform the action.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure. Details are logged, never surfaced.
    #[error("{0}")]
    Internal(String),
}
