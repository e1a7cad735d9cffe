//! Lenient field decoders for index records.
//!
//! Index records are written by hand in many repositories, so individual
//! fields are frequently missing or carry the wrong JSON type. None of these
//! decoders ever fail: a mistyped value resolves to the field's default.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Accepts only JSON strings; anything else becomes `""`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Accepts only JSON booleans; `"true"`, `1` and friends become `false`.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Accepts only JSON arrays, keeping the string elements in order.
///
/// A keyed structure at the field counts as absent, and non-string elements
/// inside an otherwise valid list are dropped one by one.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            items
                .into_iter()
                .filter_map(|item| {
                    match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    }
                })
                .collect()
        }
        _ => Vec::new(),
    })
}

/// Joins a `[major, minor, patch]` integer triple with dots.
///
/// Anything other than an array of exactly three integers yields `""`; there
/// is never a partial join.
pub(crate) fn version_triple<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(String::new());
    };
    if items.len() != 3 {
        return Ok(String::new());
    }

    let parts: Option<Vec<String>> = items
        .iter()
        .map(|item| {
            match item {
                Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
                _ => None,
            }
        })
        .collect();

    Ok(parts.map(|parts| parts.join(".")).unwrap_or_default())
}

/// Accepts only JSON objects; anything else is an empty map.
pub(crate) fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}
