use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::Value;

// Clients send answer options either as a JSON array or as a string with the
// array already encoded in it. Both end up as the same compact encoding; shape
// checks happen later in the validators.
fn encode_answer_options(value: Value) -> String {
    match value {
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(decoded @ Value::Array(_)) => decoded.to_string(),
            _ => raw,
        },
        other => other.to_string(),
    }
}

pub fn deserialize_answer_options<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(encode_answer_options)
}

pub fn deserialize_optional_answer_options<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(encode_answer_options))
}

// Use with #[serde(default)]: a missing field stays None, an explicit null
// becomes Some(None).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Like [`double_option`] for ids that may also arrive as numeric strings.
pub fn double_option_number_from_string<'de, T, D>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    T: FromStr + Deserialize<'de>,
    <T as FromStr>::Err: Display,
    D: Deserializer<'de>,
{
    deserialize_option_number_from_string(deserializer).map(Some)
}
