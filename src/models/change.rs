//! Change-stream record shapes and the typed attribute wire format.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::models::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TriggerEvent {
    Insert,
    Modify,
    Remove,
}

impl FromStr for TriggerEvent {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(Self::Insert),
            "MODIFY" => Ok(Self::Modify),
            "REMOVE" => Ok(Self::Remove),
            other => Err(NormalizeError::UnknownTriggerEvent(other.to_string())),
        }
    }
}

/// A change-stream record flattened into plain attribute mappings.
///
/// Image sections absent upstream are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChangeRecord {
    pub trigger_event: TriggerEvent,
    pub stream_type: Option<String>,
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_object: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_object: Option<Map<String, Value>>,
}

/// Supported attribute type tags: `S` (text) and `N` (number).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    S,
    N,
}

impl TypeTag {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "S" => Some(Self::S),
            "N" => Some(Self::N),
            _ => None,
        }
    }

    /// Casts a raw wire value to its native JSON type.
    ///
    /// # Errors
    ///
    /// Returns `NormalizeError::MalformedAttribute` if an `N` value is not numeric.
    pub fn cast(self, attribute: &str, raw: &Value) -> Result<Value, NormalizeError> {
        match self {
            Self::S => Ok(match raw {
                Value::String(text) => Value::String(text.clone()),
                other => Value::String(other.to_string()),
            }),
            Self::N => match raw {
                Value::Number(number) => Ok(Value::Number(number.clone())),
                Value::String(text) => parse_number(text.trim())
                    .map(Value::Number)
                    .ok_or_else(|| NormalizeError::MalformedAttribute {
                        attribute: attribute.to_string(),
                        reason: format!("'{text}' is not a number"),
                    }),
                other => Err(NormalizeError::MalformedAttribute {
                    attribute: attribute.to_string(),
                    reason: format!("expected a numeric string, found {other}"),
                }),
            },
        }
    }
}

// Integers stay integers; anything else must be a finite float.
fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(int.into());
    }
    if let Ok(uint) = text.parse::<u64>() {
        return Some(uint.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}
