//! Alias (slug) derivation for media assets.
//!
//! The alias is derived once, from the first [`ALIAS_SOURCE_LEN`] characters
//! of the display name, and is immutable afterwards: renaming an asset never
//! regenerates it.

use mediabox_core::AppResult;

/// How many leading characters of the name seed the alias.
pub const ALIAS_SOURCE_LEN: usize = 32;

/// Turn arbitrary text into a URL-safe slug.
///
/// Converts to lowercase, replaces every non-alphanumeric character with a
/// hyphen, collapses consecutive hyphens, and trims leading/trailing
/// hyphens.
pub fn slugify(text: &str) -> String {
    let raw: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut slug = String::with_capacity(raw.len());
    let mut prev_hyphen = false;
    for c in raw.chars() {
        if c == '-' {
            if !prev_hyphen {
                slug.push('-');
            }
            prev_hyphen = true;
        } else {
            slug.push(c);
            prev_hyphen = false;
        }
    }

    slug.trim_matches('-').to_string()
}

/// Derive the alias candidate for a display name.
pub fn derive_alias(name: &str) -> String {
    let prefix: String = name.chars().take(ALIAS_SOURCE_LEN).collect();
    slugify(&prefix)
}

/// Make an alias candidate unique by appending `-2`, `-3`, … until the
/// `exists` probe reports it free.
///
/// The probe is advisory; the storage unique constraint remains the source
/// of truth at write time.
pub async fn unique_alias<F, Fut>(candidate: &str, exists: F) -> AppResult<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    if !exists(candidate.to_string()).await? {
        return Ok(candidate.to_string());
    }

    let mut suffix = 2u64;
    loop {
        let probe = format!("{candidate}-{suffix}");
        if !exists(probe.clone()).await? {
            return Ok(probe);
        }
        suffix += 1;
    }
}
