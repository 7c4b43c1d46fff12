//! `HH:MM` (24-hour) wire format for optional times of day.
//!
//! Use with `#[serde(default, with = "crate::model::time_of_day")]` on an
//! `Option<NaiveTime>` field. Seconds are accepted on input and dropped on output.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// Parses `HH:MM`, also accepting `HH:MM:SS`.
#[must_use]
pub fn parse(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_err| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .ok()
}

/// ## Errors
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(time) => serializer.serialize_some(&time.format("%H:%M").to_string()),
        None => serializer.serialize_none(),
    }
}

/// ## Errors
/// Fails on text that is not a 24-hour `HH:MM` time.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse(text).map(Some).ok_or_else(|| {
            D::Error::custom(format!("invalid time of day '{text}', expected HH:MM"))
        }),
    }
}
