//! Conversion between `Value` and `serde_json::Value`.

use crate::value::{JsonMap, Value};
use thiserror::Error;

/// Errors produced when converting a `Value` back to `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// JSON has no representation for NaN or infinities.
    #[error("non-finite number {0} has no JSON representation")]
    NonFiniteNumber(f64),
}

impl From<serde_json::Value> for Value {
    /// Numbers are widened to `f64`; integers beyond 2^53 lose precision,
    /// as they would in the JSON documents these trees originate from.
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<JsonMap>(),
            ),
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = ConvertError;

    fn try_from(value: &Value) -> Result<serde_json::Value, ConvertError> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or(ConvertError::NonFiniteNumber(*n)),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(serde_json::Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            Value::Object(entries) => entries
                .iter()
                .map(|(k, v)| serde_json::Value::try_from(v).map(|v| (k.clone(), v)))
                .collect::<Result<serde_json::Map<_, _>, _>>()
                .map(serde_json::Value::Object),
        }
    }
}
