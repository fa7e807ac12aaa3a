//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ChapterId, QuizSessionError};
use storage::repository::StorageError;

/// Errors emitted by quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// No quiz exists for the requested chapter. Shown to the learner as "quiz not found".
    #[error("quiz not found for chapter {0}")]
    NotFound(ChapterId),
    /// Caller bug: the session state does not allow the requested operation.
    #[error(transparent)]
    InvalidOperation(#[from] QuizSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
