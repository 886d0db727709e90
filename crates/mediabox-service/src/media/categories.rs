//! Category resolution bound to media assets.

use mediabox_core::result::AppResult;
use mediabox_core::types::CategoryRef;
use mediabox_entity::category::Category;
use mediabox_entity::media::Media;

use crate::media::options::{self, SelectOption};
use crate::media::service::MediaService;

impl MediaService {
    /// Resolve categories for a media asset.
    ///
    /// [`CategoryRef::Own`] uses the asset's assigned category; a miss is an
    /// empty result, not an error.
    pub async fn categories(
        &self,
        media: &Media,
        reference: CategoryRef,
    ) -> AppResult<Vec<Category>> {
        self.category_repo()
            .find(reference.resolve(media.category_id))
            .await
    }

    /// Same resolution, as flattened key/value projections.
    pub async fn categories_values(
        &self,
        media: &Media,
        reference: CategoryRef,
    ) -> AppResult<Vec<serde_json::Value>> {
        self.category_repo()
            .find_values(reference.resolve(media.category_id))
            .await
    }

    /// Every category, unfiltered.
    pub async fn all_categories(&self) -> AppResult<Vec<Category>> {
        self.category_repo().find(None).await
    }

    /// The `{id → name}` label list over all categories, optionally led by
    /// the "All categories" wildcard entry.
    pub async fn category_options(&self, include_wildcard: bool) -> AppResult<Vec<SelectOption>> {
        let categories = self.all_categories().await?;
        Ok(options::category_options(
            self.translator(),
            &categories,
            include_wildcard,
        ))
    }

    /// The ordered status label list, optionally led by the "All statuses"
    /// wildcard entry.
    pub fn status_options(&self, include_wildcard: bool) -> Vec<SelectOption> {
        options::status_options(self.translator(), include_wildcard)
    }
}
