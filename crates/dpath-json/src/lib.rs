#![doc = include_str!("../README.md")]

mod error;

pub use error::JsonError;

use dpath::{Map, PathExpr, Value};
use num_traits::ToPrimitive;
use serde_json::Value as JsonValue;

/// Parses JSON text into a structure.
pub fn from_str(input: &str) -> Result<Value, JsonError> {
    let json: JsonValue = serde_json::from_str(input)?;
    Ok(value_from_json(&json))
}

/// Serializes a structure to JSON text.
pub fn to_string(value: &Value, pretty: bool) -> Result<String, JsonError> {
    let json = value_to_json(value)?;
    let text = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(text)
}

pub fn value_from_json(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // Always Some without arbitrary_precision
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(items) => {
            Value::from(items.iter().map(value_from_json).collect::<Vec<_>>())
        }
        JsonValue::Object(object) => Value::Map(
            object
                .iter()
                .map(|(key, value)| (key.clone(), value_from_json(value)))
                .collect::<Map>(),
        ),
    }
}

pub fn value_to_json(value: &Value) -> Result<JsonValue, JsonError> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Integer(i) => {
            if let Some(n) = i.to_i64() {
                return Ok(JsonValue::Number(n.into()));
            }
            if let Some(n) = i.to_u64() {
                return Ok(JsonValue::Number(n.into()));
            }
            Err(JsonError::IntegerOutOfRange(i.clone()))
        }
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or(JsonError::InvalidNumber(*f)),
        Value::Text(s) => Ok(JsonValue::String(s.clone())),
        Value::Array(array) => sequence_to_json(&array.0),
        Value::Tuple(tuple) => sequence_to_json(&tuple.0),
        Value::Set(set) => sequence_to_json(set.as_slice()),
        Value::Map(map) => {
            let mut object = serde_json::Map::new();
            for (key, value) in map.0.iter() {
                object.insert(key.clone(), value_to_json(value)?);
            }
            Ok(JsonValue::Object(object))
        }
    }
}

fn sequence_to_json(items: &[Value]) -> Result<JsonValue, JsonError> {
    let items: Result<Vec<_>, _> = items.iter().map(value_to_json).collect();
    Ok(JsonValue::Array(items?))
}

/// Parses a command-line literal: JSON when it parses, a plain string otherwise.
///
/// `1` is an integer, `"1"` and `abc` are strings.
pub fn parse_literal(input: &str) -> Value {
    from_str(input).unwrap_or_else(|_| Value::Text(input.to_string()))
}

/// Parses `sub.path=VALUE` into a filter clause, `VALUE` being read with [`parse_literal`].
pub fn parse_where(input: &str) -> Result<PathExpr, JsonError> {
    match input.split_once('=') {
        Some((path, expected)) if !path.is_empty() => {
            Ok(PathExpr::filter(path, parse_literal(expected)))
        }
        _ => Err(JsonError::InvalidWhere(input.to_string())),
    }
}
