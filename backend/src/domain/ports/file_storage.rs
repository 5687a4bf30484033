//! Driven port for questionnaire storage.

use async_trait::async_trait;

use crate::domain::{StoredFile, UploadedFile};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by storage adapters. Callers treat every variant alike.
    pub enum FileStorageError {
        /// Reading or writing the backing store failed.
        Io { message: String } => "file storage io failed: {message}",
        /// The backend refused the object.
        Rejected { message: String } => "file storage rejected upload: {message}",
    }
}

/// Storage backend for uploaded questionnaires.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write `file`. Ownership moves to the backend regardless of outcome.
    async fn store(&self, file: UploadedFile) -> Result<StoredFile, FileStorageError>;
}
