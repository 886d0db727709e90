//! Publication-aware URL resolution.

use mediabox_core::config::media::MediaConfig;
use mediabox_entity::media::{Media, MediaStatus};

/// Computes canonical and preview URLs for media assets.
///
/// URLs are derived on demand from the current entity state; nothing is
/// memoized here, so a status or alias change is reflected by the next
/// call.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    config: MediaConfig,
}

impl UrlResolver {
    /// Create a resolver over the media configuration.
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    /// The configured URL route prefix for media.
    pub fn route(&self) -> &str {
        &self.config.media_route
    }

    /// Compute the URL for a media asset.
    ///
    /// Requires the alias to be set; returns `None` otherwise. A draft asset
    /// combined with `prefer_real_url` yields the preview route
    /// (`{route}/view?alias=..&draft=true`) instead of the canonical
    /// `{route}/{alias}`. `with_scheme` prefixes the configured absolute
    /// base URL.
    pub fn media_url(
        &self,
        media: &Media,
        with_scheme: bool,
        prefer_real_url: bool,
    ) -> Option<String> {
        if media.alias.is_empty() {
            return None;
        }

        let route = self.config.media_route.trim_end_matches('/');
        let relative = if media.status == MediaStatus::Draft && prefer_real_url {
            format!("{route}/view?alias={}&draft=true", media.alias)
        } else {
            format!("{route}/{}", media.alias)
        };

        if with_scheme {
            Some(format!(
                "{}{relative}",
                self.config.base_url.trim_end_matches('/')
            ))
        } else {
            Some(relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mediabox_entity::media::{DEFAULT_CATEGORY_ID, MediaParams};

    fn media_with(alias: &str, status: MediaStatus) -> Media {
        Media {
            id: 1,
            category_id: DEFAULT_CATEGORY_ID,
            name: "Summer Banner".to_string(),
            alias: alias.to_string(),
            path: Some("summer-banner.jpg".to_string()),
            size: 1024,
            title: None,
            caption: None,
            alt: None,
            description: None,
            mime_type: "image/jpeg".to_string(),
            params: MediaParams::new(),
            reference: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
            updated_by: None,
        }
    }

    fn resolver() -> UrlResolver {
        UrlResolver::new(MediaConfig {
            media_route: "/media".to_string(),
            base_url: "https://cms.example.org".to_string(),
            ..MediaConfig::default()
        })
    }

    #[test]
    fn published_media_gets_canonical_route() {
        let url = resolver()
            .media_url(&media_with("summer-banner", MediaStatus::Published), true, true)
            .unwrap();
        assert_eq!(url, "https://cms.example.org/media/summer-banner");
    }

    #[test]
    fn draft_preview_url_carries_draft_flag() {
        let url = resolver()
            .media_url(&media_with("summer-banner", MediaStatus::Draft), true, true)
            .unwrap();
        assert_eq!(
            url,
            "https://cms.example.org/media/view?alias=summer-banner&draft=true"
        );
    }

    #[test]
    fn draft_without_preview_request_uses_canonical_shape() {
        let url = resolver()
            .media_url(&media_with("summer-banner", MediaStatus::Draft), false, false)
            .unwrap();
        assert_eq!(url, "/media/summer-banner");
    }

    #[test]
    fn missing_alias_yields_no_url() {
        assert!(resolver()
            .media_url(&media_with("", MediaStatus::Published), true, false)
            .is_none());
    }
}
