//! Inbound upload handle.

use bytes::Bytes;

/// A file received from the request boundary, pending placement into media
/// storage.
///
/// This is transient state: it is never persisted and is dropped once the
/// upload handler has placed the payload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name without the extension.
    pub base_name: String,
    /// File extension without the leading dot.
    pub extension: String,
    /// MIME type declared by the client, if any.
    pub mime_type: Option<String>,
    /// The raw file content.
    pub data: Bytes,
}

impl UploadedFile {
    /// Create an upload handle.
    pub fn new(
        base_name: impl Into<String>,
        extension: impl Into<String>,
        mime_type: Option<String>,
        data: Bytes,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            extension: extension.into(),
            mime_type,
            data,
        }
    }

    /// The stored file name, `<base_name>.<extension>`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    /// Payload size in bytes.
    pub fn size(&self) -> i64 {
        self.data.len() as i64
    }
}
