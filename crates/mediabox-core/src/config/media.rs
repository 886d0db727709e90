//! Media module configuration.

use serde::{Deserialize, Serialize};

/// Media storage and routing configuration.
///
/// Resolution follows an ordered lookup: an explicit application-level
/// override (a later config source or `MEDIABOX__MEDIA__*` environment
/// variable) wins over the module's `[media]` section, which in turn wins
/// over the hard defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Filesystem root where uploaded media files are placed.
    #[serde(default = "default_media_path")]
    pub media_path: String,
    /// URL path prefix under which published media is addressed.
    #[serde(default = "default_media_route")]
    pub media_route: String,
    /// Absolute base URL prepended when a scheme-qualified URL is requested.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unix permission mode applied when creating the media directory.
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,
    /// File extensions accepted for upload.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            media_path: default_media_path(),
            media_route: default_media_route(),
            base_url: default_base_url(),
            dir_mode: default_dir_mode(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_media_path() -> String {
    "./data/media".to_string()
}

fn default_media_route() -> String {
    "/media".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_dir_mode() -> u32 {
    0o775
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["png".to_string(), "jpg".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_defaults() {
        let cfg = MediaConfig::default();
        assert_eq!(cfg.media_route, "/media");
        assert_eq!(cfg.dir_mode, 0o775);
        assert_eq!(cfg.allowed_extensions, vec!["png", "jpg"]);
    }

    #[test]
    fn module_section_overrides_defaults() {
        let cfg: MediaConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "media_path = \"/srv/uploads\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.media_path, "/srv/uploads");
        // Untouched keys fall back to the hard defaults.
        assert_eq!(cfg.media_route, "/media");
    }

    #[test]
    fn later_source_wins_over_module_section() {
        let cfg: MediaConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "media_route = \"/files\"",
                config::FileFormat::Toml,
            ))
            .add_source(config::File::from_str(
                "media_route = \"/assets\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.media_route, "/assets");
    }
}
