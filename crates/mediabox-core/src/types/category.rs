//! Category reference type.

use serde::{Deserialize, Serialize};

/// How a category lookup should be scoped.
///
/// Replaces the loosely-typed "integer id, wildcard, or nothing" parameter of
/// older CMS media modules with an explicit tagged variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryRef {
    /// Use the category assigned to the entity at hand.
    Own,
    /// A specific category by id.
    Id(i64),
    /// No category filter; every category matches.
    All,
}

impl CategoryRef {
    /// Resolve the concrete category id to filter on, if any.
    ///
    /// `own` is the entity's assigned category, consulted for [`Self::Own`].
    pub fn resolve(&self, own: i64) -> Option<i64> {
        match self {
            Self::Own => Some(own),
            Self::Id(id) => Some(*id),
            Self::All => None,
        }
    }
}

impl From<i64> for CategoryRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_to_id_or_nothing() {
        assert_eq!(CategoryRef::Own.resolve(7), Some(7));
        assert_eq!(CategoryRef::Id(3).resolve(7), Some(3));
        assert_eq!(CategoryRef::All.resolve(7), None);
    }
}
