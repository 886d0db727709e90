//! Media entity model and write shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::params::{MediaParams, ParamsInput};
use super::status::MediaStatus;

/// Category assigned when a write does not name one.
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// A media asset stored in Mediabox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Media {
    /// Surrogate identifier, assigned by storage on creation.
    pub id: i64,
    /// The category this asset belongs to.
    pub category_id: i64,
    /// Display name; source of the alias.
    pub name: String,
    /// URL-safe slug, unique across all media, immutable once set.
    pub alias: String,
    /// Stored file name relative to the media root; set only by the upload
    /// handler.
    pub path: Option<String>,
    /// Stored file size in bytes.
    pub size: i64,
    /// Title shown alongside the asset.
    pub title: Option<String>,
    /// Caption text.
    pub caption: Option<String>,
    /// Alternate text for accessibility.
    pub alt: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// MIME type of the stored file.
    pub mime_type: String,
    /// Structured metadata; serialized text at rest, structured in memory.
    pub params: MediaParams,
    /// External reference string.
    pub reference: Option<String>,
    /// Publication state.
    pub status: MediaStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Actor who created the record, when the request carried an identity.
    pub created_by: Option<i64>,
    /// Actor who last updated the record.
    pub updated_by: Option<i64>,
}

/// The validated write model handed to the repository.
///
/// Assembled by the service from a [`MediaInput`] plus, on update, the
/// stored row. The alias is already derived and unique-checked by the time
/// this struct exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaWrite {
    /// Target category; defaulted to [`DEFAULT_CATEGORY_ID`] on insert when
    /// absent.
    pub category_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Derived or caller-supplied slug.
    pub alias: String,
    /// Stored file name, if a file has been placed.
    pub path: Option<String>,
    /// Stored file size in bytes.
    pub size: i64,
    /// Title.
    pub title: Option<String>,
    /// Caption.
    pub caption: Option<String>,
    /// Alternate text.
    pub alt: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// MIME type; empty until the upload handler detects it.
    pub mime_type: String,
    /// Structured metadata.
    pub params: MediaParams,
    /// External reference.
    pub reference: Option<String>,
    /// Publication state.
    pub status: MediaStatus,
}

/// Inbound create/update request body for a media asset.
///
/// Declarative rules cover what the DTO can know locally; the service folds
/// them into the collected per-field error set together with the domain
/// rules (params well-formedness, alias uniqueness, file extension).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MediaInput {
    /// Display name.
    #[validate(length(min = 3, max = 128))]
    pub name: String,
    /// Explicit alias; derived from `name` when omitted.
    #[validate(length(min = 3, max = 128))]
    pub alias: Option<String>,
    /// Target category id.
    pub category_id: Option<i64>,
    /// Title.
    #[validate(length(max = 255))]
    pub title: Option<String>,
    /// Caption.
    #[validate(length(max = 550))]
    pub caption: Option<String>,
    /// Alternate text.
    #[validate(length(max = 255))]
    pub alt: Option<String>,
    /// Free-form description (unbounded).
    pub description: Option<String>,
    /// External reference.
    #[validate(length(max = 255))]
    pub reference: Option<String>,
    /// Structured metadata, as text or object.
    pub params: Option<ParamsInput>,
    /// Publication state as its numeric wire form (0 or 1).
    pub status: Option<i16>,
}

impl Media {
    /// Whether this asset is published.
    pub fn is_published(&self) -> bool {
        self.status == MediaStatus::Published
    }

    /// The stored file extension (lowercase), if a file has been placed.
    pub fn extension(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(|p| p.rsplit('.').next().filter(|ext| *ext != p))
            .map(|ext| ext.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_comes_from_stored_path() {
        let media = Media {
            id: 1,
            category_id: DEFAULT_CATEGORY_ID,
            name: "Banner".to_string(),
            alias: "banner".to_string(),
            path: Some("banner.JPG".to_string()),
            size: 10,
            title: None,
            caption: None,
            alt: None,
            description: None,
            mime_type: "image/jpeg".to_string(),
            params: MediaParams::new(),
            reference: None,
            status: MediaStatus::Published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
            updated_by: None,
        };
        assert_eq!(media.extension().as_deref(), Some("jpg"));
        assert!(media.is_published());
    }
}
