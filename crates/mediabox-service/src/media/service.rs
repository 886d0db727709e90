//! Media write orchestration and read-side loading.

use std::sync::Arc;

use tracing::{debug, info};

use mediabox_core::config::media::MediaConfig;
use mediabox_core::error::{AppError, ErrorKind};
use mediabox_core::i18n::Translator;
use mediabox_core::result::AppResult;
use mediabox_core::types::Condition;
use mediabox_database::repositories::{CategoryRepository, MediaRepository};
use mediabox_entity::media::{
    DEFAULT_CATEGORY_ID, Media, MediaInput, MediaParams, MediaStatus, MediaWrite, UploadedFile,
    ValidationCode, ValidationErrors, slug,
    validate::{validate_input, validate_write},
};
use mediabox_storage::{MediaStore, UploadError};

use crate::context::RequestContext;
use crate::identity::{Attribution, IdentityProvider, attribution};
use crate::media::url::UrlResolver;

/// Error surfaced by media write operations.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The per-field validation error set; persistence was not attempted.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// The upload step failed; entity fields were left untouched.
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// Any other failure (database, configuration, ...).
    #[error(transparent)]
    Other(#[from] AppError),
}

/// A media record as observed after a read: params structured, URL
/// populated.
#[derive(Debug, Clone)]
pub struct LoadedMedia {
    /// The entity row.
    pub media: Media,
    /// Canonical URL, computed at read time; set whenever the alias is.
    pub url: Option<String>,
}

/// Orchestrates the media asset lifecycle.
pub struct MediaService {
    repo: Arc<MediaRepository>,
    categories: Arc<CategoryRepository>,
    store: Arc<MediaStore>,
    urls: UrlResolver,
    config: MediaConfig,
    messages: Arc<dyn Translator>,
    identity: Option<Arc<dyn IdentityProvider>>,
}

impl MediaService {
    /// Creates a new media service. The identity capability is resolved
    /// here, once; pass `None` when the host has no user system.
    pub fn new(
        repo: Arc<MediaRepository>,
        categories: Arc<CategoryRepository>,
        store: Arc<MediaStore>,
        config: MediaConfig,
        messages: Arc<dyn Translator>,
        identity: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        Self {
            repo,
            categories,
            store,
            urls: UrlResolver::new(config.clone()),
            config,
            messages,
            identity,
        }
    }

    /// The URL resolver bound to this service's configuration.
    pub fn urls(&self) -> &UrlResolver {
        &self.urls
    }

    pub(crate) fn category_repo(&self) -> &CategoryRepository {
        &self.categories
    }

    pub(crate) fn translator(&self) -> &dyn Translator {
        self.messages.as_ref()
    }

    /// Create a media asset.
    ///
    /// Runs the collected validation, normalizes params, derives the alias
    /// when none is supplied, places the attached file, applies the category
    /// and status defaults, and persists. Nothing is written, neither row
    /// nor file, while validation errors are outstanding.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: MediaInput,
        file: Option<UploadedFile>,
    ) -> Result<Media, SaveError> {
        let mut errors = validate_input(&input);

        let params = self.normalize_params(input.params.clone(), None, &mut errors);
        let status = resolve_status(input.status, MediaStatus::default());

        let alias = match input.alias.clone().filter(|alias| !alias.is_empty()) {
            Some(alias) => {
                if self.repo.alias_exists(&alias, None).await? {
                    errors.add(
                        "alias",
                        ValidationCode::DuplicateAlias,
                        "Alias must be unique.",
                    );
                }
                alias
            }
            None => self.derive_unique_alias(&input.name).await?,
        };

        let mut write = MediaWrite {
            category_id: input.category_id,
            name: input.name.clone(),
            alias,
            path: None,
            size: 0,
            title: input.title.clone(),
            caption: input.caption.clone(),
            alt: input.alt.clone(),
            description: input.description.clone(),
            mime_type: String::new(),
            params,
            reference: input.reference.clone(),
            status,
        };

        errors.merge(validate_write(
            &write,
            file.as_ref(),
            &self.config.allowed_extensions,
        ));
        if !errors.is_empty() {
            return Err(SaveError::Validation(errors));
        }

        if file.is_some() {
            let stored = self.store.upload(file.as_ref()).await?;
            write.path = Some(stored.file_name);
            write.mime_type = stored.mime_type;
            write.size = stored.size;
        }

        if write.category_id.is_none() {
            write.category_id = Some(DEFAULT_CATEGORY_ID);
        }

        let media = self
            .repo
            .insert(&write, ctx.actor)
            .await
            .map_err(unique_violation_to_validation)?;

        info!(media_id = media.id, alias = %media.alias, "Media created");
        Ok(media)
    }

    /// Update a media asset.
    ///
    /// Fields absent from the input keep their stored values. The alias is
    /// immutable: a supplied alias is validated for shape but never replaces
    /// the stored one, and renaming never regenerates it.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: MediaInput,
        file: Option<UploadedFile>,
    ) -> Result<Media, SaveError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Media {id} not found")))?;

        let mut errors = validate_input(&input);

        if let Some(alias) = input.alias.as_deref() {
            if alias != current.alias {
                debug!(media_id = id, "Ignoring alias change on update");
            }
        }

        let params =
            self.normalize_params(input.params.clone(), Some(&current.params), &mut errors);

        let mut write = MediaWrite {
            category_id: input.category_id.or(Some(current.category_id)),
            name: input.name.clone(),
            alias: current.alias.clone(),
            path: current.path.clone(),
            size: current.size,
            title: input.title.clone().or_else(|| current.title.clone()),
            caption: input.caption.clone().or_else(|| current.caption.clone()),
            alt: input.alt.clone().or_else(|| current.alt.clone()),
            description: input
                .description
                .clone()
                .or_else(|| current.description.clone()),
            mime_type: current.mime_type.clone(),
            params,
            reference: input.reference.clone().or_else(|| current.reference.clone()),
            status: resolve_status(input.status, current.status),
        };

        errors.merge(validate_write(
            &write,
            file.as_ref(),
            &self.config.allowed_extensions,
        ));
        if !errors.is_empty() {
            return Err(SaveError::Validation(errors));
        }

        if file.is_some() {
            let stored = self.store.upload(file.as_ref()).await?;
            write.path = Some(stored.file_name);
            write.mime_type = stored.mime_type;
            write.size = stored.size;
        }

        let media = self
            .repo
            .update(id, &write, ctx.actor)
            .await
            .map_err(unique_violation_to_validation)?;

        info!(media_id = media.id, "Media updated");
        Ok(media)
    }

    /// Load a media asset by id, with its URL populated.
    pub async fn load(&self, id: i64) -> AppResult<Option<LoadedMedia>> {
        Ok(self.repo.find_by_id(id).await?.map(|m| self.into_loaded(m)))
    }

    /// Load a media asset by alias, with its URL populated.
    pub async fn find_by_alias(&self, alias: &str) -> AppResult<Option<LoadedMedia>> {
        Ok(self
            .repo
            .find_by_alias(alias)
            .await?
            .map(|m| self.into_loaded(m)))
    }

    /// Published media, optionally narrowed by an extra condition.
    pub async fn published(&self, extra: Option<&Condition>) -> AppResult<Vec<Media>> {
        self.repo.published(extra).await
    }

    /// Published media as flattened key/value projections.
    pub async fn published_values(
        &self,
        extra: Option<&Condition>,
    ) -> AppResult<Vec<serde_json::Value>> {
        self.repo.published_values(extra).await
    }

    /// All media, drafts included, optionally filtered.
    pub async fn all(&self, extra: Option<&Condition>) -> AppResult<Vec<Media>> {
        self.repo.all(extra).await
    }

    /// All media as flattened key/value projections.
    pub async fn all_values(&self, extra: Option<&Condition>) -> AppResult<Vec<serde_json::Value>> {
        self.repo.all_values(extra).await
    }

    /// Who created this record, resolved through the identity capability
    /// when one is present.
    pub async fn creator(&self, media: &Media) -> AppResult<Option<Attribution>> {
        attribution(self.identity.as_deref(), media.created_by).await
    }

    /// Who last updated this record.
    pub async fn updater(&self, media: &Media) -> AppResult<Option<Attribution>> {
        attribution(self.identity.as_deref(), media.updated_by).await
    }

    fn into_loaded(&self, media: Media) -> LoadedMedia {
        let url = self.urls.media_url(&media, true, false);
        LoadedMedia { media, url }
    }

    fn normalize_params(
        &self,
        input: Option<mediabox_entity::media::ParamsInput>,
        current: Option<&MediaParams>,
        errors: &mut ValidationErrors,
    ) -> MediaParams {
        match input {
            Some(input) => match MediaParams::from_input(input) {
                Ok(params) => params,
                Err(e) => {
                    errors.add(
                        "params",
                        ValidationCode::InvalidParams,
                        format!("The value of field `params` must be a valid JSON, error: {e}."),
                    );
                    current.cloned().unwrap_or_default()
                }
            },
            None => current.cloned().unwrap_or_default(),
        }
    }

    async fn derive_unique_alias(&self, name: &str) -> AppResult<String> {
        let candidate = slug::derive_alias(name);
        if candidate.is_empty() {
            return Ok(candidate);
        }
        let repo = self.repo.clone();
        slug::unique_alias(&candidate, move |probe| {
            let repo = repo.clone();
            async move { repo.alias_exists(&probe, None).await }
        })
        .await
    }
}

fn resolve_status(raw: Option<i16>, fallback: MediaStatus) -> MediaStatus {
    // Out-of-range values were already recorded by the input validation.
    raw.and_then(|v| MediaStatus::try_from(v).ok()).unwrap_or(fallback)
}

/// Map the storage layer's unique-constraint rejection back into the
/// per-field error contract.
fn unique_violation_to_validation(err: AppError) -> SaveError {
    if err.kind == ErrorKind::Conflict {
        let mut errors = ValidationErrors::new();
        errors.add(
            "alias",
            ValidationCode::DuplicateAlias,
            "Alias must be unique.",
        );
        SaveError::Validation(errors)
    } else {
        SaveError::Other(err)
    }
}
