//! Category entity model.
//!
//! Categories are referenced, never owned, by media assets: this module
//! only reads them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A media category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
