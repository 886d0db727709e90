//! Structured metadata (`params`) value object.
//!
//! Params are an arbitrary key-value map attached to a media asset. In
//! memory they are always the structured [`MediaParams`] value; the
//! serialized-text form exists only at the persistence boundary (the TEXT
//! column) and at the input edge, where callers are allowed to hand over
//! either representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error produced when serialized params text cannot be normalized.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The text is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The text parsed, but not to a key-value object.
    #[error("expected a JSON object")]
    NotAnObject,
}

/// Structured metadata attached to a media asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaParams(Map<String, Value>);

impl MediaParams {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no metadata is attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a metadata value, returning the previous one if present.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Decode from the serialized-text form (read boundary).
    pub fn from_text(text: &str) -> Result<Self, ParamsError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ParamsError::NotAnObject),
        }
    }

    /// Encode to the serialized-text form (write boundary).
    pub fn to_text(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Normalize a caller-supplied params representation.
    ///
    /// Accepts either serialized text or an already-structured object; the
    /// result is always structured.
    pub fn from_input(input: ParamsInput) -> Result<Self, ParamsError> {
        match input {
            ParamsInput::Text(text) => Self::from_text(&text),
            ParamsInput::Object(map) => Ok(Self(map)),
        }
    }
}

impl From<Map<String, Value>> for MediaParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Caller-facing params representation at the input edge.
///
/// Legacy clients submit params as serialized text, newer ones as a
/// structured object; both are accepted and normalized exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamsInput {
    /// An already-structured key-value object.
    Object(Map<String, Value>),
    /// Serialized JSON text.
    Text(String),
}

impl sqlx::Type<sqlx::Postgres> for MediaParams {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for MediaParams {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let text = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_text(text)?)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for MediaParams {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.to_text(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_round_trip_preserves_structure() {
        let mut params = MediaParams::new();
        params.insert("focal_point", json!({"x": 0.5, "y": 0.25}));
        params.insert("license", json!("cc-by"));

        let decoded = MediaParams::from_text(&params.to_text()).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn input_accepts_both_representations() {
        let from_text =
            MediaParams::from_input(ParamsInput::Text(r#"{"a":1}"#.to_string())).unwrap();
        let mut map = Map::new();
        map.insert("a".to_string(), json!(1));
        let from_object = MediaParams::from_input(ParamsInput::Object(map)).unwrap();
        assert_eq!(from_text, from_object);
    }

    #[test]
    fn malformed_text_is_rejected() {
        let err = MediaParams::from_text("{not json").unwrap_err();
        assert!(matches!(err, ParamsError::Parse(_)));
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = MediaParams::from_text("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ParamsError::NotAnObject));
    }
}
