//! Canonical speaker lists for events.
//!
//! ## Summary
//! Event records carry "who is presenting" in several shapes: a JSON array, a
//! newline- or comma-delimited string, a JSON array encoded inside a string, or
//! one of the single-name fields (`speaker_name`, `presenter`, `author`).
//! [`normalize_speakers`] folds all of them into one ordered list of display
//! names and never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::RESERVED_AUTHOR_NAME;

/// Minimum number of characters a trimmed name needs to be shown.
const MIN_NAME_CHARS: usize = 2;

/// The stored `speakers` field, in whatever shape it was written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RawSpeakerField {
    List(Vec<String>),
    Text(String),
    #[default]
    Absent,
}

impl From<Value> for RawSpeakerField {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(name) => Some(name),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::String(text) => Self::Text(text),
            _ => Self::Absent,
        }
    }
}

impl From<RawSpeakerField> for Value {
    fn from(field: RawSpeakerField) -> Self {
        match field {
            RawSpeakerField::List(items) => Self::Array(items.into_iter().map(Self::String).collect()),
            RawSpeakerField::Text(text) => Self::String(text),
            RawSpeakerField::Absent => Self::Null,
        }
    }
}

impl RawSpeakerField {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Every field the normalizer may draw a name from.
#[derive(Debug, Clone, Copy)]
pub struct SpeakerSources<'a> {
    pub raw: &'a RawSpeakerField,
    pub speaker_name: Option<&'a str>,
    pub presenter: Option<&'a str>,
    pub author: Option<&'a str>,
}

/// ## Summary
/// Produces the ordered list of speaker names for an event.
///
/// A non-empty list parsed from `raw` wins. Otherwise the first usable single
/// name among `speaker_name`, `presenter` and `author` is used; an author equal
/// to "admin" (any case) is never shown. With nothing usable the result is the
/// placeholder alone. The result is never empty.
#[must_use]
pub fn normalize_speakers(sources: &SpeakerSources<'_>, placeholder: &str) -> Vec<String> {
    let listed = match sources.raw {
        RawSpeakerField::List(items) => keep_names(items.iter().map(String::as_str)),
        RawSpeakerField::Text(text) => names_from_text(text),
        RawSpeakerField::Absent => Vec::new(),
    };
    if !listed.is_empty() {
        return listed;
    }

    let single = usable_name(sources.speaker_name)
        .or_else(|| usable_name(sources.presenter))
        .or_else(|| {
            usable_name(sources.author)
                .filter(|name| !name.eq_ignore_ascii_case(RESERVED_AUTHOR_NAME))
        });

    match single {
        Some(name) => vec![name],
        None => vec![placeholder.to_string()],
    }
}

/// A JSON array inside the string is read as a list; anything else is split on
/// newlines and commas.
fn names_from_text(text: &str) -> Vec<String> {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
        return keep_names(items.iter().filter_map(Value::as_str));
    }
    keep_names(text.split(['\n', ',']))
}

fn keep_names<'a>(candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    candidates
        .filter_map(|candidate| usable_name(Some(candidate)))
        .collect()
}

fn usable_name(candidate: Option<&str>) -> Option<String> {
    let trimmed = candidate?.trim();
    (trimmed.chars().count() >= MIN_NAME_CHARS).then(|| trimmed.to_string())
}
