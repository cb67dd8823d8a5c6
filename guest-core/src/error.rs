//! Error taxonomy for the guest API.
//!
//! Every failure a handler can produce maps to exactly one variant, and
//! the HTTP layer converts each variant to a structured JSON response;
//! none propagate as unhandled faults.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Operation-level failures. Validation and identifier problems map to
/// HTTP 422, missing rows to 404, storage faults to 500.
#[derive(Debug, Error)]
pub enum GuestError {
    /// One or more field-level validation failures.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// The path identifier is not a well-formed positive integer.
    #[error("Invalid identifier")]
    InvalidIdentifier,

    /// No guest row exists for the given id.
    #[error("Guest not found")]
    NotFound,

    /// The storage layer failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failures surfaced by a `GuestStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected a write that slipped past the advisory
    /// pre-check. Deliberately not converted into a validation error:
    /// the pre-check is the only source of 422s for uniqueness.
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
