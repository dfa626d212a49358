//! Forgiving field readers for the dashboard payload
//!
//! The service relays whatever its model produced, so a field can be missing,
//! null, or of an unexpected JSON type. These readers keep what they can
//! instead of failing the whole reply.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keys tried, in order, when an object shows up where text was expected
const TEXT_KEYS: [&str; 5] = ["text", "insight", "title", "label", "description"];

/// Render a JSON value as display text; null is no text
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Object(map) => {
            let picked = TEXT_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str).map(str::to_string));
            Some(picked.unwrap_or_else(|| Value::Object(map).to_string()))
        }
        other => Some(other.to_string()),
    }
}

/// Text; null reads as empty
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Optional text; null reads as absent
pub(crate) fn opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// List of text; a lone value becomes a one-item list, null items are skipped
pub(crate) fn text_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Array(items) => Some(items.into_iter().filter_map(value_text).collect()),
        other => value_text(other).map(|s| vec![s]),
    })
}

/// List of records; items that don't parse are dropped
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Optional record; anything that doesn't parse reads as absent
pub(crate) fn opt_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => serde_json::from_value(value).ok(),
    })
}
