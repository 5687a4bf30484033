//! Questionnaire upload service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{FileStorage, UploadService};
use crate::domain::{Error, NO_FILE_UPLOADED_MESSAGE, StoredFile, UploadedFile};

/// Upload service implementing [`UploadService`] over a [`FileStorage`].
#[derive(Clone)]
pub struct QuestionnaireUploadService<S> {
    storage: Arc<S>,
}

impl<S> QuestionnaireUploadService<S> {
    /// Create a service over the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S> UploadService for QuestionnaireUploadService<S>
where
    S: FileStorage,
{
    async fn upload(&self, file: Option<UploadedFile>) -> Result<StoredFile, Error> {
        let file = file.ok_or_else(|| Error::invalid_request(NO_FILE_UPLOADED_MESSAGE))?;
        let file_name = file.file_name().to_owned();
        let stored = self
            .storage
            .store(file)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(
            file_name = %file_name,
            storage_key = %stored.storage_key,
            size = stored.size,
            "questionnaire stored"
        );
        Ok(stored)
    }
}
