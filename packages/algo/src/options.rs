//! Answer option payloads.
//!
//! Content authors store options either as a list of `{id, text}` objects or
//! as a flat `id -> text` object. Both shapes are accepted here and turned
//! into one ordered `Vec<AnswerOption>`.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::AnswerOption;

/// Stored option shapes
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionsPayload {
    List(Vec<AnswerOption>),
    Map(serde_json::Map<String, Value>),
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("options payload is neither a list nor an object: {0}")]
    UnsupportedShape(String),
    #[error("option `{id}` has non-text value")]
    NonTextValue { id: String },
}

impl OptionsPayload {
    /// Parse a raw JSON value into one of the supported shapes
    pub fn from_value(value: &Value) -> Result<Self, OptionsError> {
        serde_json::from_value(value.clone())
            .map_err(|_| OptionsError::UnsupportedShape(shape_name(value).to_string()))
    }

    /// Canonical list form. Map entries follow key order.
    pub fn into_options(self) -> Result<Vec<AnswerOption>, OptionsError> {
        match self {
            Self::List(options) => Ok(options),
            Self::Map(map) => map
                .into_iter()
                .map(|(id, text)| match text {
                    Value::String(text) => Ok(AnswerOption { id, text }),
                    Value::Number(number) => Ok(AnswerOption {
                        id,
                        text: number.to_string(),
                    }),
                    _ => Err(OptionsError::NonTextValue { id }),
                })
                .collect(),
        }
    }
}

/// Normalize a stored payload; `null` means no options
pub fn parse_options(value: &Value) -> Result<Vec<AnswerOption>, OptionsError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    OptionsPayload::from_value(value)?.into_options()
}

/// Same as [`parse_options`] but starting from stored JSON text
pub fn parse_options_str(raw: &str) -> Result<Vec<AnswerOption>, OptionsError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(raw)
        .map_err(|_| OptionsError::UnsupportedShape("invalid json".to_string()))?;
    parse_options(&value)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
