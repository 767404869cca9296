/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

// Parses numbers that are sent as strings. Anything unparsable becomes the default (zero)
pub fn from_numeric_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr + Default,
{
    let v: Option<Value> = Deserialize::deserialize(deserializer)?;
    let parsed = match &v {
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(Value::Number(n)) => n.to_string().parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        log::debug!("Unparsable numeric field {:?}, defaulting to zero", v);
    }
    Ok(parsed.unwrap_or_default())
}

// Parses RFC3339 timestamps, falling back to the unix epoch
pub fn from_rfc3339_or_epoch<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Option<Value> = Deserialize::deserialize(deserializer)?;
    let parsed = match &v {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|d| d.with_timezone(&Utc))
            .ok(),
        _ => None,
    };
    if parsed.is_none() {
        log::debug!("Unparsable date field {:?}, defaulting to epoch", v);
    }
    Ok(parsed.unwrap_or(DateTime::UNIX_EPOCH))
}

// Parses strings that may be null and sets to ""
pub fn from_null_to_empty_str<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.unwrap_or_default())
}

// Parses lists and maps that may be null and sets them to empty
pub fn from_null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let v: Option<T> = Deserialize::deserialize(deserializer)?;
    Ok(v.unwrap_or_default())
}
