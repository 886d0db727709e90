//! Media publication status enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Publication state of a media asset.
///
/// Stored as a SMALLINT; only published assets appear in default listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    /// Not yet published; reachable only through preview URLs.
    Draft = 0,
    /// Published and visible in default listings.
    Published = 1,
}

impl MediaStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// The user-facing label message id for this status.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }
}

impl Default for MediaStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for MediaStatus {
    type Error = mediabox_core::AppError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Published),
            _ => Err(mediabox_core::AppError::validation(format!(
                "Invalid media status: '{value}'. Expected 0 (draft) or 1 (published)"
            ))),
        }
    }
}

impl FromStr for MediaStatus {
    type Err = mediabox_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(mediabox_core::AppError::validation(format!(
                "Invalid media status: '{s}'. Expected one of: draft, published"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_conversion_accepts_only_defined_states() {
        assert_eq!(MediaStatus::try_from(0).unwrap(), MediaStatus::Draft);
        assert_eq!(MediaStatus::try_from(1).unwrap(), MediaStatus::Published);
        assert!(MediaStatus::try_from(2).is_err());
        assert!(MediaStatus::try_from(-1).is_err());
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("published".parse::<MediaStatus>().unwrap(), MediaStatus::Published);
        assert_eq!("Draft".parse::<MediaStatus>().unwrap(), MediaStatus::Draft);
        assert!("archived".parse::<MediaStatus>().is_err());
    }
}
