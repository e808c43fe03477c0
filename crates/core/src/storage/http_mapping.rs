//! HTTP status codes for [`RepositoryError`] variants.
//!
//! Kept free of any HTTP crate so the core stays I/O agnostic.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// ```
/// use shopme_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::not_found("Product", 7);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}
