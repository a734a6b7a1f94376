//! Parsing and validation of `tags.json`
//!
//! The document is read as a JSON mapping and validated into a [`ConfigDocument`].
//! Optional keys are filled with defaults; everything else that doesn't match the
//! expected shape is a [`ConfigError`].

use serde::Deserialize;
use serde::de::{Error as _, Unexpected};
use serde_json::{Map, Value};

use super::error::{ConfigError, json_type_name};
use super::quick_tag::{DisplaySettings, QuickTag};
use crate::constants::keys;

/// A fully validated configuration: quick tags sorted by name plus display settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigDocument {
    pub quick_tags: Vec<QuickTag>,
    pub display: DisplaySettings,
}

impl ConfigDocument {
    /// Build a document from already-parsed JSON
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let root = expect_object(&value, "a mapping of settings")?;

        let entries: &[Value] = match root.get(keys::TAGS) {
            None => &[],
            Some(Value::Array(entries)) => entries,
            Some(other) => return Err(shape_error(other, "a list of tags")),
        };

        let mut quick_tags = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let entry = expect_object(entry, "a tag mapping")?;
            let name = text_field(entry, keys::NAME)?;
            let shortcut = text_field(entry, keys::SHORTCUT)?;

            // Fully blank rows are placeholders in the template file
            if is_blank(&name) && is_blank(&shortcut) {
                continue;
            }
            if is_blank(&name) {
                return Err(ConfigError::MissingName { index });
            }

            quick_tags.push(QuickTag::new(name, shortcut));
        }

        // Stable, ordinal (byte-wise) ordering
        quick_tags.sort_by(|a, b| a.name().cmp(b.name()));

        let no_settings = Map::new();
        let other_tags = match root.get(keys::OTHER_TAGS) {
            None => &no_settings,
            Some(value) => expect_object(value, "a mapping of other-tags settings")?,
        };

        let display = DisplaySettings {
            other_tags_visible: visible_setting(other_tags)?,
            other_tags_limit: limit_setting(other_tags)?,
        };

        Ok(Self {
            quick_tags,
            display,
        })
    }

    /// Names of the configured quick tags, in display order
    pub fn quick_tag_names(&self) -> impl Iterator<Item = &str> {
        self.quick_tags.iter().map(QuickTag::name)
    }
}

fn expect_object<'v>(
    value: &'v Value,
    expected: &str,
) -> Result<&'v Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| shape_error(value, expected))
}

fn shape_error(value: &Value, expected: &str) -> ConfigError {
    let unexpected = match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => Unexpected::Unsigned(u),
            (None, Some(i)) => Unexpected::Signed(i),
            _ => Unexpected::Float(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    };
    ConfigError::Shape(serde_json::Error::invalid_type(unexpected, &expected))
}

/// Text value of `key`; absent or `null` reads as empty
fn text_field(entry: &Map<String, Value>, key: &str) -> Result<String, ConfigError> {
    match entry.get(key) {
        None => Ok(String::new()),
        Some(value) => Option::<String>::deserialize(value)
            .map(Option::unwrap_or_default)
            .map_err(ConfigError::Shape),
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn field_path(key: &str) -> String {
    format!("{}:{}", keys::OTHER_TAGS, key)
}

fn visible_setting(other_tags: &Map<String, Value>) -> Result<bool, ConfigError> {
    match other_tags.get(keys::VISIBLE) {
        None => Ok(DisplaySettings::default().other_tags_visible),
        Some(Value::Bool(visible)) => Ok(*visible),
        Some(other) => Err(ConfigError::InvalidType {
            field: field_path(keys::VISIBLE),
            expected: "bool",
            found: json_type_name(other),
        }),
    }
}

fn limit_setting(other_tags: &Map<String, Value>) -> Result<usize, ConfigError> {
    let Some(value) = other_tags.get(keys::LIMIT) else {
        return Ok(DisplaySettings::default().other_tags_limit);
    };

    value
        .as_u64()
        .and_then(|limit| usize::try_from(limit).ok())
        .ok_or_else(|| ConfigError::InvalidType {
            field: field_path(keys::LIMIT),
            expected: "non-negative int",
            found: json_type_name(value),
        })
}
