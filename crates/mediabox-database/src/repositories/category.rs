//! Category repository implementation.
//!
//! Media only reads categories; creation and deletion belong to the
//! category module. A lookup miss yields an empty result, not an error.

use sqlx::PgPool;

use mediabox_core::error::{AppError, ErrorKind};
use mediabox_core::result::AppResult;
use mediabox_entity::category::Category;

/// Repository for read-only category lookups.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch categories, optionally narrowed to a single id.
    pub async fn find(&self, id: Option<i64>) -> AppResult<Vec<Category>> {
        match id {
            Some(id) => sqlx::query_as::<_, Category>(
                "SELECT id, name, description FROM categories WHERE id = $1",
            )
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find category", e)
            }),
            None => sqlx::query_as::<_, Category>(
                "SELECT id, name, description FROM categories ORDER BY id ASC",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list categories", e)
            }),
        }
    }

    /// Same lookup, as flattened key/value projections.
    pub async fn find_values(&self, id: Option<i64>) -> AppResult<Vec<serde_json::Value>> {
        let categories = self.find(id).await?;
        categories
            .iter()
            .map(|c| serde_json::to_value(c).map_err(AppError::from))
            .collect()
    }
}
