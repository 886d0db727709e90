//! Localization seam.
//!
//! User-facing labels and messages are produced through a message lookup
//! keyed by a namespace and a message id. The rest of the system treats
//! translated strings as opaque.

use std::collections::HashMap;

/// Message lookup for user-facing strings.
///
/// The message id doubles as the source-language (English) text; a catalog
/// miss falls back to returning the id itself.
pub trait Translator: Send + Sync {
    /// Translate `message` within `namespace`.
    fn translate(&self, namespace: &str, message: &str) -> String;
}

/// An in-memory catalog of translations.
///
/// The default (empty) catalog is the identity translator used when the host
/// application supplies no translations.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<(String, String), String>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register translations for a namespace.
    pub fn with_messages<'a>(
        mut self,
        namespace: &str,
        messages: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        for (id, text) in messages {
            self.entries
                .insert((namespace.to_string(), id.to_string()), text.to_string());
        }
        self
    }
}

impl Translator for StaticCatalog {
    fn translate(&self, namespace: &str, message: &str) -> String {
        self.entries
            .get(&(namespace.to_string(), message.to_string()))
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}

/// Namespace used by the media module for its labels and messages.
pub const MEDIA_NAMESPACE: &str = "app/modules/media";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_identity() {
        let catalog = StaticCatalog::new();
        assert_eq!(catalog.translate(MEDIA_NAMESPACE, "Draft"), "Draft");
    }

    #[test]
    fn registered_messages_are_translated() {
        let catalog =
            StaticCatalog::new().with_messages(MEDIA_NAMESPACE, [("Draft", "Entwurf")]);
        assert_eq!(catalog.translate(MEDIA_NAMESPACE, "Draft"), "Entwurf");
        // Other namespaces are unaffected.
        assert_eq!(catalog.translate("app", "Draft"), "Draft");
    }
}
