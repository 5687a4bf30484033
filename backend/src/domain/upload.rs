//! Questionnaire files accepted for upload.

/// Message returned when no usable file accompanies an upload request.
pub const NO_FILE_UPLOADED_MESSAGE: &str = "No file uploaded.";

/// Message returned when storage accepted the file.
pub const FILE_UPLOADED_MESSAGE: &str = "File uploaded successfully.";

/// Fallback name for parts submitted without a file name.
const DEFAULT_FILE_NAME: &str = "questionnaire";

/// Raised when an upload carries no bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No file uploaded.")]
pub struct EmptyUploadError;

/// Binary payload received from a client.
///
/// ## Invariants
/// - `content` is non-empty.
///
/// # Examples
/// ```
/// use survey_backend::domain::UploadedFile;
///
/// let file = UploadedFile::new(Some("survey.xlsx".into()), None, vec![1, 2, 3]).unwrap();
/// assert_eq!(file.len(), 3);
/// assert!(UploadedFile::new(None, None, Vec::new()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    content: Vec<u8>,
}

impl UploadedFile {
    /// Validate and wrap an uploaded payload.
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        content: Vec<u8>,
    ) -> Result<Self, EmptyUploadError> {
        if content.is_empty() {
            return Err(EmptyUploadError);
        }
        let file_name = file_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned());
        Ok(Self {
            file_name,
            content_type,
            content,
        })
    }

    /// Client-supplied file name, or a fallback when none was sent.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Declared MIME type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Payload length in bytes. Always greater than zero.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Raw bytes.
    pub fn content(&self) -> &[u8] {
        self.content.as_slice()
    }

    /// Consume the file, yielding its bytes.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.content.len())
            .finish()
    }
}

/// Location assigned by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Backend-specific key identifying the stored object.
    pub storage_key: String,
    /// Bytes written.
    pub size: u64,
}
