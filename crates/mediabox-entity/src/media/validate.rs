//! Collected per-field validation for media writes.
//!
//! Every applicable rule runs; violations are reported together rather than
//! fail-fast, and a save never proceeds while the set is non-empty.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::Validate;

use mediabox_core::AppError;

use super::file::UploadedFile;
use super::model::{MediaInput, MediaWrite};

/// Minimum length for name, alias, and MIME type.
pub const NAME_MIN: usize = 3;
/// Maximum length for name, alias, and MIME type.
pub const NAME_MAX: usize = 128;
/// Maximum length for path, title, alt, and reference.
pub const TEXT_MAX: usize = 255;
/// Maximum length for the caption.
pub const CAPTION_MAX: usize = 550;

/// Machine-readable classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    /// A required field is absent or empty.
    Required,
    /// A string field is outside its length bounds.
    LengthOutOfRange,
    /// A field value has an invalid shape.
    InvalidFormat,
    /// The params field is not well-formed serialized data.
    InvalidParams,
    /// The alias collides with an existing media record.
    DuplicateAlias,
    /// The alias contains characters outside `[A-Za-z0-9_-]`.
    InvalidAliasFormat,
    /// The attached file has an unsupported extension.
    UnsupportedFileType,
}

/// A single validation failure on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Failure classification.
    pub code: ValidationCode,
    /// Source-language message; hosts translate it through the
    /// localization seam using the message as the id.
    pub message: String,
}

/// The structured per-field error set surfaced to callers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<ValidationIssue>>,
}

impl ValidationErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure on a field. Exact duplicates (same field and code)
    /// are kept once.
    pub fn add(&mut self, field: impl Into<String>, code: ValidationCode, message: impl Into<String>) {
        let field = field.into();
        let issues = self.errors.entry(field).or_default();
        if issues.iter().any(|issue| issue.code == code) {
            return;
        }
        issues.push(ValidationIssue {
            code,
            message: message.into(),
        });
    }

    /// Fold another error set into this one.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, issues) in other.errors {
            for issue in issues {
                self.add(field.clone(), issue.code, issue.message);
            }
        }
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failures recorded for one field.
    pub fn field(&self, name: &str) -> &[ValidationIssue] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over fields and their failures.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValidationIssue])> {
        self.errors
            .iter()
            .map(|(field, issues)| (field.as_str(), issues.as_slice()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed:")?;
        for (field, issues) in &self.errors {
            for issue in issues {
                write!(f, " {field}: {};", issue.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(errors.to_string())
    }
}

/// Run the DTO's declarative rules and fold them into the collected set.
pub fn validate_input(input: &MediaInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Err(derive_errors) = input.validate() {
        for (field, field_errors) in derive_errors.field_errors() {
            for error in field_errors {
                let code = match error.code.as_ref() {
                    "length" => ValidationCode::LengthOutOfRange,
                    "required" => ValidationCode::Required,
                    _ => ValidationCode::InvalidFormat,
                };
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Value of field `{field}` is invalid."));
                errors.add(field.to_string(), code, message);
            }
        }
    }

    if let Some(alias) = input.alias.as_deref() {
        check_alias_charset(alias, &mut errors);
    }

    if let Some(status) = input.status {
        if !(0..=1).contains(&status) {
            errors.add(
                "status",
                ValidationCode::InvalidFormat,
                "Status must be 0 (draft) or 1 (published).",
            );
        }
    }

    errors
}

/// Validate the assembled write model against the full rule set.
///
/// `file` is the pending upload, if any; `allowed_extensions` comes from the
/// media configuration.
pub fn validate_write(
    write: &MediaWrite,
    file: Option<&UploadedFile>,
    allowed_extensions: &[String],
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if write.name.trim().is_empty() {
        errors.add("name", ValidationCode::Required, "Name is required.");
    } else {
        check_length(&write.name, "name", NAME_MIN, NAME_MAX, &mut errors);
    }

    if write.alias.is_empty() {
        errors.add("alias", ValidationCode::Required, "Alias is required.");
    } else {
        check_length(&write.alias, "alias", NAME_MIN, NAME_MAX, &mut errors);
        check_alias_charset(&write.alias, &mut errors);
    }

    // The raw uploaded content: either a pending file or an already-placed
    // path must exist.
    if file.is_none() && write.path.is_none() {
        errors.add("file", ValidationCode::Required, "An uploaded file is required.");
    }

    if let Some(file) = file {
        let extension = file.extension.to_lowercase();
        if !allowed_extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension)) {
            errors.add(
                "file",
                ValidationCode::UnsupportedFileType,
                format!(
                    "Files with the `{extension}` extension are not allowed. Allowed extensions: {}.",
                    allowed_extensions.join(", ")
                ),
            );
        }
    }

    // The MIME type is detected by the upload handler, so it may legitimately
    // be empty while a file is still pending.
    if write.mime_type.is_empty() {
        if file.is_none() {
            errors.add("mime_type", ValidationCode::Required, "Mime type is required.");
        }
    } else {
        check_length(&write.mime_type, "mime_type", NAME_MIN, NAME_MAX, &mut errors);
    }

    if let Some(path) = write.path.as_deref() {
        check_length(path, "path", 0, TEXT_MAX, &mut errors);
    }
    if let Some(title) = write.title.as_deref() {
        check_length(title, "title", 0, TEXT_MAX, &mut errors);
    }
    if let Some(alt) = write.alt.as_deref() {
        check_length(alt, "alt", 0, TEXT_MAX, &mut errors);
    }
    if let Some(reference) = write.reference.as_deref() {
        check_length(reference, "reference", 0, TEXT_MAX, &mut errors);
    }
    if let Some(caption) = write.caption.as_deref() {
        check_length(caption, "caption", 0, CAPTION_MAX, &mut errors);
    }

    errors
}

fn check_length(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
    errors: &mut ValidationErrors,
) {
    let len = value.chars().count();
    if len < min || len > max {
        errors.add(
            field,
            ValidationCode::LengthOutOfRange,
            format!("Value of field `{field}` must be between {min} and {max} characters."),
        );
    }
}

fn check_alias_charset(alias: &str, errors: &mut ValidationErrors) {
    let valid = !alias.is_empty()
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        errors.add(
            "alias",
            ValidationCode::InvalidAliasFormat,
            "It allowed only Latin alphabet, numbers and the \u{ab}-\u{bb}, \u{ab}_\u{bb} characters.",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::params::MediaParams;
    use crate::media::status::MediaStatus;
    use bytes::Bytes;

    fn write_fixture() -> MediaWrite {
        MediaWrite {
            category_id: Some(1),
            name: "Summer Banner".to_string(),
            alias: "summer-banner".to_string(),
            path: Some("summer-banner.jpg".to_string()),
            size: 2048,
            title: None,
            caption: None,
            alt: None,
            description: None,
            mime_type: "image/jpeg".to_string(),
            params: MediaParams::new(),
            reference: None,
            status: MediaStatus::Draft,
        }
    }

    fn allowed() -> Vec<String> {
        vec!["png".to_string(), "jpg".to_string()]
    }

    #[test]
    fn valid_write_produces_no_errors() {
        let errors = validate_write(&write_fixture(), None, &allowed());
        assert!(errors.is_empty(), "{errors}");
    }

    #[test]
    fn violations_are_collected_not_fail_fast() {
        let mut write = write_fixture();
        write.name = "ab".to_string();
        write.alias = "bad alias!".to_string();
        write.caption = Some("x".repeat(600));

        let errors = validate_write(&write, None, &allowed());
        assert_eq!(errors.field("name")[0].code, ValidationCode::LengthOutOfRange);
        assert_eq!(errors.field("alias")[0].code, ValidationCode::InvalidAliasFormat);
        assert_eq!(errors.field("caption")[0].code, ValidationCode::LengthOutOfRange);
    }

    #[test]
    fn missing_content_is_required() {
        let mut write = write_fixture();
        write.path = None;

        let errors = validate_write(&write, None, &allowed());
        assert_eq!(errors.field("file")[0].code, ValidationCode::Required);
    }

    #[test]
    fn pending_file_satisfies_content_and_defers_mime() {
        let mut write = write_fixture();
        write.path = None;
        write.mime_type = String::new();
        let file = UploadedFile::new("banner", "jpg", None, Bytes::from_static(b"img"));

        let errors = validate_write(&write, Some(&file), &allowed());
        assert!(errors.is_empty(), "{errors}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut write = write_fixture();
        write.path = None;
        let file = UploadedFile::new("clip", "gif", None, Bytes::from_static(b"img"));

        let errors = validate_write(&write, Some(&file), &allowed());
        assert_eq!(errors.field("file")[0].code, ValidationCode::UnsupportedFileType);
    }

    #[test]
    fn input_length_rules_fold_into_the_set() {
        let input = MediaInput {
            name: "ab".to_string(),
            alias: Some("x".repeat(200)),
            ..MediaInput::default()
        };

        let errors = validate_input(&input);
        assert_eq!(errors.field("name")[0].code, ValidationCode::LengthOutOfRange);
        assert_eq!(errors.field("alias")[0].code, ValidationCode::LengthOutOfRange);
    }

    #[test]
    fn input_status_outside_range_is_invalid() {
        let input = MediaInput {
            name: "Banner".to_string(),
            status: Some(7),
            ..MediaInput::default()
        };

        let errors = validate_input(&input);
        assert_eq!(errors.field("status")[0].code, ValidationCode::InvalidFormat);
    }

    #[test]
    fn input_alias_charset_is_checked() {
        let input = MediaInput {
            name: "Banner".to_string(),
            alias: Some("no spaces".to_string()),
            ..MediaInput::default()
        };

        let errors = validate_input(&input);
        assert_eq!(errors.field("alias")[0].code, ValidationCode::InvalidAliasFormat);
    }

    #[test]
    fn duplicate_codes_per_field_collapse() {
        let mut errors = ValidationErrors::new();
        errors.add("alias", ValidationCode::DuplicateAlias, "Alias must be unique.");
        errors.add("alias", ValidationCode::DuplicateAlias, "Alias must be unique.");
        assert_eq!(errors.field("alias").len(), 1);
    }
}
