//! Directory-backed `FileStorage` adapter.
//!
//! Uploads are written through a `cap_std` directory capability so a hostile
//! file name can never escape the configured root. Each file is staged under
//! a temporary name and renamed into place, so readers never observe a
//! partial write.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use uuid::Uuid;

use crate::domain::ports::{FileStorage, FileStorageError};
use crate::domain::{StoredFile, TraceId, UploadedFile};

const MAX_NAME_CHARS: usize = 100;

/// Stores each upload as `<uuid>-<sanitised name>` under one directory.
#[derive(Clone)]
pub struct DirectoryFileStorage {
    root: Arc<Dir>,
}

impl DirectoryFileStorage {
    /// Open (creating if needed) the upload directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be created
    /// or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let root = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            root: Arc::new(root),
        })
    }
}

/// Reduce a client-supplied name to a safe single path component.
fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_CHARS)
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload".to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn write_atomically(root: &Dir, key: &str, content: &[u8]) -> io::Result<()> {
    let staging = format!(".tmp-{key}");
    if let Err(error) = root.write(&staging, content) {
        let _cleanup = root.remove_file(&staging);
        return Err(error);
    }
    root.rename(&staging, root, key).inspect_err(|_| {
        let _cleanup = root.remove_file(&staging);
    })
}

#[async_trait]
impl FileStorage for DirectoryFileStorage {
    async fn store(&self, file: UploadedFile) -> Result<StoredFile, FileStorageError> {
        let key = format!(
            "{}-{}",
            Uuid::new_v4().simple(),
            sanitize_file_name(file.file_name())
        );
        let content = file.into_content();
        let size = content.len() as u64;
        let root = Arc::clone(&self.root);
        let storage_key = key.clone();
        TraceId::spawn_blocking(move || write_atomically(&root, &key, &content))
            .await
            .map_err(|error| FileStorageError::io(format!("storage task failed: {error}")))?
            .map_err(|error| FileStorageError::io(error.to_string()))?;
        Ok(StoredFile { storage_key, size })
    }
}
