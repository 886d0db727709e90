//! Local filesystem media store.

use std::path::PathBuf;

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use mediabox_core::config::media::MediaConfig;
use mediabox_core::error::{AppError, ErrorKind};
use mediabox_entity::media::UploadedFile;

/// Error produced while placing an uploaded file.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// No file was attached to the request.
    #[error("no file attached to the upload")]
    MissingFile,
    /// The media root could not be created or accessed.
    #[error("media storage unavailable: {0}")]
    StorageUnavailable(#[source] std::io::Error),
    /// The file payload could not be written.
    #[error("failed to write media file: {0}")]
    WriteFailed(#[source] std::io::Error),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::Storage, message, err)
    }
}

/// The outcome of a successful upload.
///
/// The caller assigns these onto the entity; a failed upload therefore never
/// mutates entity state.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Stored file name relative to the media root.
    pub file_name: String,
    /// Detected MIME type.
    pub mime_type: String,
    /// Payload size in bytes.
    pub size: i64,
}

/// Places uploaded files under the configured media root.
#[derive(Debug, Clone)]
pub struct MediaStore {
    /// Root directory for all media files.
    root: PathBuf,
    /// Permission mode applied to created directories.
    dir_mode: u32,
}

impl MediaStore {
    /// Create a store rooted at the configured media path.
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: PathBuf::from(&config.media_path),
            dir_mode: config.dir_mode,
        }
    }

    /// The resolved media root.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Place an uploaded file into the media root.
    ///
    /// Creates the root directory (recursively) if missing, writes the
    /// payload to a temporary name, and renames it to
    /// `<base_name>.<extension>`. Re-uploading under an existing name
    /// replaces the stored file; the previous payload is not cleaned up
    /// beyond the overwrite.
    pub async fn upload(&self, file: Option<&UploadedFile>) -> Result<StoredFile, UploadError> {
        let Some(file) = file else {
            return Err(UploadError::MissingFile);
        };

        self.ensure_root().await?;

        let file_name = file.file_name();
        let final_path = self.root.join(&file_name);
        let temp_path = self.root.join(format!(".{}.{}", Uuid::new_v4(), file_name));

        fs::write(&temp_path, &file.data)
            .await
            .map_err(UploadError::WriteFailed)?;
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(UploadError::WriteFailed(e));
        }

        let mime_type = file
            .mime_type
            .clone()
            .unwrap_or_else(|| mime_from_extension(&file.extension).to_string());

        debug!(file = %file_name, bytes = file.size(), "Stored media file");

        Ok(StoredFile {
            file_name,
            mime_type,
            size: file.size(),
        })
    }

    async fn ensure_root(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(UploadError::StorageUnavailable)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.root, std::fs::Permissions::from_mode(self.dir_mode))
                .await
                .map_err(UploadError::StorageUnavailable)?;
        }

        Ok(())
    }
}

/// MIME type for a file extension, as detected at placement time.
fn mime_from_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn store_at(root: &std::path::Path) -> MediaStore {
        let config = MediaConfig {
            media_path: root.to_string_lossy().to_string(),
            ..MediaConfig::default()
        };
        MediaStore::new(&config)
    }

    #[tokio::test]
    async fn upload_places_file_under_fresh_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("uploads/media");
        let store = store_at(&root);

        let file = UploadedFile::new("banner", "jpg", None, Bytes::from_static(b"jpeg-bytes"));
        let stored = store.upload(Some(&file)).await.unwrap();

        assert_eq!(stored.file_name, "banner.jpg");
        assert_eq!(stored.mime_type, "image/jpeg");
        assert_eq!(stored.size, 10);
        let on_disk = std::fs::read(root.join("banner.jpg")).unwrap();
        assert_eq!(on_disk, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn upload_without_file_fails_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("uploads/media");
        let store = store_at(&root);

        let result = store.upload(None).await;
        assert!(matches!(result, Err(UploadError::MissingFile)));
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn reupload_replaces_previous_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        let first = UploadedFile::new("banner", "png", None, Bytes::from_static(b"v1"));
        let second = UploadedFile::new("banner", "png", None, Bytes::from_static(b"v2"));
        store.upload(Some(&first)).await.unwrap();
        store.upload(Some(&second)).await.unwrap();

        let on_disk = std::fs::read(dir.path().join("banner.png")).unwrap();
        assert_eq!(on_disk, b"v2");
    }

    #[tokio::test]
    async fn declared_mime_type_wins_over_detection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());

        let file = UploadedFile::new(
            "photo",
            "jpg",
            Some("image/pjpeg".to_string()),
            Bytes::from_static(b"x"),
        );
        let stored = store.upload(Some(&file)).await.unwrap();
        assert_eq!(stored.mime_type, "image/pjpeg");
    }

    #[test]
    fn mime_detection_table() {
        assert_eq!(mime_from_extension("PNG"), "image/png");
        assert_eq!(mime_from_extension("jpeg"), "image/jpeg");
        assert_eq!(mime_from_extension("bin"), "application/octet-stream");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn root_directory_gets_configured_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("media");
        let store = store_at(&root);

        let file = UploadedFile::new("a", "png", None, Bytes::from_static(b"x"));
        store.upload(Some(&file)).await.unwrap();

        let mode = std::fs::metadata(&root).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o775);
    }
}
