use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Unsigned integers and numeric strings are accepted, anything else becomes `None`.
pub fn deserialize_lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where D: Deserializer<'de>
{
    let value = Value::deserialize(deserializer)?;

    let number = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(string) => u64::from_str(string.trim()).ok(),
        _ => None,
    };

    return Ok(number);
}

pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where D: Deserializer<'de>
{
    let value = Value::deserialize(deserializer)?;

    let string = match value {
        Value::String(string) => Some(string),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    };

    return Ok(string);
}

/// A value that does not fit `T` becomes `None` instead of failing the outer object.
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    return Ok(serde_json::from_value::<T>(value).ok());
}
