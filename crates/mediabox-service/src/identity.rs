//! Optional identity capability.
//!
//! When the host application has a user system it injects an
//! [`IdentityProvider`] at service construction; `created_by`/`updated_by`
//! then resolve to identity records. Without one, attribution stays a raw
//! identifier. The capability is resolved once, at construction, never
//! probed per call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mediabox_core::AppResult;

/// A resolved identity record from the host's user system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// The user's id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Display name, if distinct from the login name.
    pub display_name: Option<String>,
}

/// Lookup seam into the host's user system.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a user id to an identity record, if it exists.
    async fn resolve(&self, id: i64) -> AppResult<Option<Identity>>;
}

/// Attribution of a record to the actor who touched it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Attribution {
    /// The actor resolved to an identity record.
    Resolved(Identity),
    /// Only the raw identifier is known.
    Raw(i64),
}

/// Resolve an optional actor id through an optional provider.
pub(crate) async fn attribution(
    provider: Option<&dyn IdentityProvider>,
    id: Option<i64>,
) -> AppResult<Option<Attribution>> {
    let Some(id) = id else {
        return Ok(None);
    };

    match provider {
        Some(provider) => Ok(Some(
            provider
                .resolve(id)
                .await?
                .map(Attribution::Resolved)
                .unwrap_or(Attribution::Raw(id)),
        )),
        None => Ok(Some(Attribution::Raw(id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneUser;

    #[async_trait]
    impl IdentityProvider for OneUser {
        async fn resolve(&self, id: i64) -> AppResult<Option<Identity>> {
            Ok((id == 1).then(|| Identity {
                id: 1,
                username: "editor".to_string(),
                display_name: None,
            }))
        }
    }

    #[tokio::test]
    async fn resolves_through_provider_when_present() {
        let result = attribution(Some(&OneUser), Some(1)).await.unwrap();
        assert!(matches!(result, Some(Attribution::Resolved(ref i)) if i.username == "editor"));
    }

    #[tokio::test]
    async fn unknown_id_falls_back_to_raw() {
        let result = attribution(Some(&OneUser), Some(99)).await.unwrap();
        assert!(matches!(result, Some(Attribution::Raw(99))));
    }

    #[tokio::test]
    async fn absent_provider_keeps_raw_identifier() {
        let result = attribution(None, Some(5)).await.unwrap();
        assert!(matches!(result, Some(Attribution::Raw(5))));
    }

    #[tokio::test]
    async fn absent_actor_yields_nothing() {
        let result = attribution(Some(&OneUser), None).await.unwrap();
        assert!(result.is_none());
    }
}
