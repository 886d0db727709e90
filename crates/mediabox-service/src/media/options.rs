//! Label lists for UI selection affordances.

use serde::{Deserialize, Serialize};

use mediabox_core::i18n::{MEDIA_NAMESPACE, Translator};
use mediabox_entity::category::Category;
use mediabox_entity::media::MediaStatus;

/// Sentinel value used by the "no filter" wildcard entries.
pub const WILDCARD: &str = "*";

/// One entry of an ordered label list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The filter value submitted back by the UI.
    pub value: String,
    /// The translated label.
    pub label: String,
}

/// Ordered status label list, optionally led by an "All statuses" wildcard.
pub fn status_options(messages: &dyn Translator, include_wildcard: bool) -> Vec<SelectOption> {
    let mut options = Vec::new();
    if include_wildcard {
        options.push(SelectOption {
            value: WILDCARD.to_string(),
            label: messages.translate(MEDIA_NAMESPACE, "All statuses"),
        });
    }
    for status in [MediaStatus::Draft, MediaStatus::Published] {
        options.push(SelectOption {
            value: (status as i16).to_string(),
            label: messages.translate(MEDIA_NAMESPACE, status.label()),
        });
    }
    options
}

/// Ordered category label list, optionally led by an "All categories"
/// wildcard.
pub fn category_options(
    messages: &dyn Translator,
    categories: &[Category],
    include_wildcard: bool,
) -> Vec<SelectOption> {
    let mut options = Vec::new();
    if include_wildcard {
        options.push(SelectOption {
            value: WILDCARD.to_string(),
            label: messages.translate(MEDIA_NAMESPACE, "All categories"),
        });
    }
    for category in categories {
        options.push(SelectOption {
            value: category.id.to_string(),
            label: category.name.clone(),
        });
    }
    options
}

/// Translated labels for the media attributes, keyed by field name.
///
/// Used by admin forms and error rendering in the host application.
pub fn attribute_labels(messages: &dyn Translator) -> Vec<(&'static str, String)> {
    [
        ("id", "ID"),
        ("category_id", "Category ID"),
        ("name", "Name"),
        ("alias", "Alias"),
        ("path", "File path"),
        ("size", "File size"),
        ("title", "Title"),
        ("caption", "Caption"),
        ("alt", "Alternate"),
        ("description", "Description"),
        ("mime_type", "Mime type"),
        ("params", "Params"),
        ("reference", "Reference"),
        ("status", "Status"),
        ("created_at", "Created at"),
        ("created_by", "Created by"),
        ("updated_at", "Updated at"),
        ("updated_by", "Updated by"),
    ]
    .into_iter()
    .map(|(field, label)| (field, messages.translate(MEDIA_NAMESPACE, label)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediabox_core::i18n::StaticCatalog;

    #[test]
    fn status_list_is_ordered_draft_then_published() {
        let catalog = StaticCatalog::new();
        let options = status_options(&catalog, false);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "0");
        assert_eq!(options[0].label, "Draft");
        assert_eq!(options[1].value, "1");
        assert_eq!(options[1].label, "Published");
    }

    #[test]
    fn wildcard_entry_leads_the_status_list() {
        let catalog = StaticCatalog::new();
        let options = status_options(&catalog, true);
        assert_eq!(options[0].value, WILDCARD);
        assert_eq!(options[0].label, "All statuses");
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn category_list_maps_id_to_name() {
        let catalog = StaticCatalog::new();
        let categories = vec![
            Category {
                id: 1,
                name: "Default".to_string(),
                description: None,
            },
            Category {
                id: 4,
                name: "Banners".to_string(),
                description: None,
            },
        ];
        let options = category_options(&catalog, &categories, true);
        assert_eq!(options[0].value, WILDCARD);
        assert_eq!(options[1].value, "1");
        assert_eq!(options[1].label, "Default");
        assert_eq!(options[2].value, "4");
    }

    #[test]
    fn labels_go_through_the_translator() {
        let catalog = StaticCatalog::new()
            .with_messages(MEDIA_NAMESPACE, [("Draft", "Entwurf"), ("All statuses", "Alle")]);
        let options = status_options(&catalog, true);
        assert_eq!(options[0].label, "Alle");
        assert_eq!(options[1].label, "Entwurf");
    }
}
