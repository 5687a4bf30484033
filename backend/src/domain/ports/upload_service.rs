//! Driving port for questionnaire uploads.

use async_trait::async_trait;

use crate::domain::{Error, StoredFile, UploadedFile};

/// Accepts questionnaire files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Store `file`. `None` means the request carried no usable file part.
    async fn upload(&self, file: Option<UploadedFile>) -> Result<StoredFile, Error>;
}
