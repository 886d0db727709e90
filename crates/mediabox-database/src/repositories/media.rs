//! Media repository implementation.

use sqlx::PgPool;

use mediabox_core::error::{AppError, ErrorKind};
use mediabox_core::result::AppResult;
use mediabox_core::types::{Condition, ConditionOp, ConditionValue};
use mediabox_entity::media::{DEFAULT_CATEGORY_ID, Media, MediaStatus, MediaWrite};

/// Columns accepted in caller-supplied field conditions.
const MEDIA_COLUMNS: &[&str] = &[
    "id",
    "category_id",
    "name",
    "alias",
    "path",
    "size",
    "title",
    "caption",
    "alt",
    "description",
    "mime_type",
    "params",
    "reference",
    "status",
    "created_at",
    "updated_at",
    "created_by",
    "updated_by",
];

const MEDIA_WRITE_COLUMNS: &str = "category_id, name, alias, path, size, title, caption, alt, \
     description, mime_type, params, reference, status";

/// Repository for media CRUD and filtered retrieval.
#[derive(Debug, Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    /// Create a new media repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated write model, stamping timestamps and the creating
    /// actor. A unique violation on the alias surfaces as a conflict.
    pub async fn insert(&self, write: &MediaWrite, actor: Option<i64>) -> AppResult<Media> {
        sqlx::query_as::<_, Media>(&format!(
            "INSERT INTO media ({MEDIA_WRITE_COLUMNS}, created_at, updated_at, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW(), $14, $14) \
             RETURNING *",
        ))
        .bind(write.category_id.unwrap_or(DEFAULT_CATEGORY_ID))
        .bind(&write.name)
        .bind(&write.alias)
        .bind(&write.path)
        .bind(write.size)
        .bind(&write.title)
        .bind(&write.caption)
        .bind(&write.alt)
        .bind(&write.description)
        .bind(&write.mime_type)
        .bind(&write.params)
        .bind(&write.reference)
        .bind(write.status)
        .bind(actor)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to insert media", e))
    }

    /// Update an existing row, refreshing `updated_at`/`updated_by`.
    pub async fn update(&self, id: i64, write: &MediaWrite, actor: Option<i64>) -> AppResult<Media> {
        sqlx::query_as::<_, Media>(
            "UPDATE media SET category_id = $2, name = $3, alias = $4, path = $5, size = $6, \
             title = $7, caption = $8, alt = $9, description = $10, mime_type = $11, \
             params = $12, reference = $13, status = $14, updated_at = NOW(), updated_by = $15 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(write.category_id.unwrap_or(DEFAULT_CATEGORY_ID))
        .bind(&write.name)
        .bind(&write.alias)
        .bind(&write.path)
        .bind(write.size)
        .bind(&write.title)
        .bind(&write.caption)
        .bind(&write.alt)
        .bind(&write.description)
        .bind(&write.mime_type)
        .bind(&write.params)
        .bind(&write.reference)
        .bind(write.status)
        .bind(actor)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to update media", e))?
        .ok_or_else(|| AppError::not_found(format!("Media {id} not found")))
    }

    /// Find a media record by id.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Media>> {
        sqlx::query_as::<_, Media>("SELECT * FROM media WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find media", e))
    }

    /// Find a media record by its alias.
    pub async fn find_by_alias(&self, alias: &str) -> AppResult<Option<Media>> {
        sqlx::query_as::<_, Media>("SELECT * FROM media WHERE alias = $1")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find media by alias", e)
            })
    }

    /// Advisory uniqueness pre-check for an alias.
    ///
    /// `exclude_id` skips the record being updated. The unique constraint
    /// on the column remains the authoritative check at write time.
    pub async fn alias_exists(&self, alias: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM media WHERE alias = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(alias)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check alias", e))
    }

    /// List published media, optionally narrowed by an extra condition.
    ///
    /// The publication filter is always ANDed in; the extra condition can
    /// narrow but never widen the result.
    pub async fn published(&self, extra: Option<&Condition>) -> AppResult<Vec<Media>> {
        self.list(Some(MediaStatus::Published), extra).await
    }

    /// List all media (draft and published), optionally filtered.
    pub async fn all(&self, extra: Option<&Condition>) -> AppResult<Vec<Media>> {
        self.list(None, extra).await
    }

    /// Published media as flattened key/value projections.
    pub async fn published_values(
        &self,
        extra: Option<&Condition>,
    ) -> AppResult<Vec<serde_json::Value>> {
        let rows = self.published(extra).await?;
        rows.iter().map(flatten).collect()
    }

    /// All media as flattened key/value projections.
    pub async fn all_values(&self, extra: Option<&Condition>) -> AppResult<Vec<serde_json::Value>> {
        let rows = self.all(extra).await?;
        rows.iter().map(flatten).collect()
    }

    async fn list(
        &self,
        status: Option<MediaStatus>,
        extra: Option<&Condition>,
    ) -> AppResult<Vec<Media>> {
        let (sql, value) = build_list_sql(status, extra)?;

        let mut query = sqlx::query_as::<_, Media>(&sql);
        if let Some(status) = status {
            query = query.bind(status);
        }
        if let Some(value) = value {
            query = match value {
                ConditionValue::String(s) => query.bind(s.clone()),
                ConditionValue::Integer(i) => query.bind(*i),
                ConditionValue::Boolean(b) => query.bind(*b),
            };
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list media", e))
    }
}

/// Build the listing SQL, merging the status filter with the caller's extra
/// condition. Returns the SQL and the condition value still to be bound.
fn build_list_sql<'a>(
    status: Option<MediaStatus>,
    extra: Option<&'a Condition>,
) -> AppResult<(String, Option<&'a ConditionValue>)> {
    let mut clauses: Vec<String> = Vec::new();
    let mut bind_value = None;
    let mut next_param = 1;

    if status.is_some() {
        clauses.push(format!("status = ${next_param}"));
        next_param += 1;
    }

    match extra {
        Some(Condition::Field { column, op, value }) => {
            if !MEDIA_COLUMNS.contains(&column.as_str()) {
                return Err(AppError::validation(format!(
                    "Unknown media column in condition: '{column}'"
                )));
            }
            let op_sql = match op {
                ConditionOp::Eq => "=",
                ConditionOp::Like => "LIKE",
            };
            clauses.push(format!("{column} {op_sql} ${next_param}"));
            bind_value = Some(value);
        }
        Some(Condition::Raw(fragment)) => {
            clauses.push(format!("({fragment})"));
        }
        None => {}
    }

    let mut sql = "SELECT * FROM media".to_string();
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id ASC");

    Ok((sql, bind_value))
}

/// Flatten an entity into the key/value projection shape. Params stay in
/// their at-rest serialized form, matching what a raw row read would yield.
fn flatten(media: &Media) -> AppResult<serde_json::Value> {
    let mut value = serde_json::to_value(media)?;
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "params".to_string(),
            serde_json::Value::String(media.params.to_text()),
        );
    }
    Ok(value)
}

fn map_write_error(context: &str, error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_error) = error {
        if db_error.code().as_deref() == Some("23505") {
            return AppError::conflict("Media alias must be unique");
        }
    }
    AppError::with_source(ErrorKind::Database, context, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_sql_always_contains_status_filter() {
        let (sql, value) = build_list_sql(Some(MediaStatus::Published), None).unwrap();
        assert_eq!(sql, "SELECT * FROM media WHERE status = $1 ORDER BY id ASC");
        assert!(value.is_none());
    }

    #[test]
    fn extra_condition_is_merged_not_overwritten() {
        let cond = Condition::eq("category_id", 3i64);
        let (sql, value) = build_list_sql(Some(MediaStatus::Published), Some(&cond)).unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM media WHERE status = $1 AND category_id = $2 ORDER BY id ASC"
        );
        assert_eq!(value, Some(&ConditionValue::Integer(3)));
    }

    #[test]
    fn all_applies_only_the_extra_condition() {
        let cond = Condition::like("name", "Summer%");
        let (sql, _) = build_list_sql(None, Some(&cond)).unwrap();
        assert_eq!(sql, "SELECT * FROM media WHERE name LIKE $1 ORDER BY id ASC");
        assert!(!sql.contains("status"));
    }

    #[test]
    fn raw_fragments_are_parenthesized() {
        let cond = Condition::raw("size > 1024");
        let (sql, value) = build_list_sql(Some(MediaStatus::Published), Some(&cond)).unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM media WHERE status = $1 AND (size > 1024) ORDER BY id ASC"
        );
        assert!(value.is_none());
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let cond = Condition::eq("password", "x");
        assert!(build_list_sql(None, Some(&cond)).is_err());
    }
}
