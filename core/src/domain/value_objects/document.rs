//! Identity document attached in the upload step.

use xh_shared::VerificationConfig;

use crate::errors::ValidationError;

/// One file selected by the user
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    /// `content_type` is trimmed and lowercased
    pub fn new(file_name: impl Into<String>, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.trim().to_ascii_lowercase(),
            bytes,
        }
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Checks type and size against the configured limits
    pub fn validate(&self, config: &VerificationConfig) -> Result<(), ValidationError> {
        if !config.accepts_document_type(&self.content_type) {
            return Err(ValidationError::UnsupportedFileType {
                content_type: self.content_type.clone(),
            });
        }
        if self.bytes.is_empty() {
            return Err(ValidationError::NoDocument);
        }
        if self.size() > config.max_document_bytes {
            return Err(ValidationError::FileTooLarge {
                limit_bytes: config.max_document_bytes,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}
