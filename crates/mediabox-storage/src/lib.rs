//! # mediabox-storage
//!
//! Filesystem placement of uploaded media files.

pub mod local;

pub use local::{MediaStore, StoredFile, UploadError};
