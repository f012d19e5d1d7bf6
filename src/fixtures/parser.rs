use std::fs;
use std::path::Path;

use serde_json::Value;
use serde_yaml::value::TaggedValue;
use tracing::trace;

use super::{FieldMap, FieldValue, FixtureFile};
use crate::error::{IoError, ParserError, Result};

/// YAML tag marking an explicit reference: `state: !ref new_york`.
pub const REFERENCE_TAG: &str = "ref";

/// Parser for fixture files.
///
/// JSON is accepted through the same path since every JSON document is
/// valid YAML.
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a fixture file; the collection is named after the file stem.
    pub fn parse_file(&self, path: &Path) -> Result<FixtureFile> {
        trace!(path = %path.display(), "parsing fixture file");
        let content = fs::read_to_string(path).map_err(|e| IoError::read_error(path, e))?;

        let collection = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let mut file = self.parse_str(&collection, &content, path)?;
        file.source = Some(path.to_path_buf());
        Ok(file)
    }

    /// Parse fixture content. `origin` is only used in error messages.
    pub fn parse_str(&self, collection: &str, content: &str, origin: &Path) -> Result<FixtureFile> {
        let document: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| ParserError::invalid_yaml(origin, e.to_string()))?;

        let mut file = FixtureFile::new(collection);
        let mapping = match document {
            serde_yaml::Value::Mapping(mapping) => mapping,
            // an empty file is an empty collection
            serde_yaml::Value::Null => return Ok(file),
            _ => return Err(ParserError::not_a_mapping(origin).into()),
        };

        for (key, entry) in mapping {
            let key = scalar_key(&key)
                .ok_or_else(|| ParserError::invalid_fixture_key(origin, format!("{key:?}")))?;
            let fields = match entry {
                serde_yaml::Value::Mapping(fields) => parse_field_map(&key, fields)?,
                serde_yaml::Value::Null => FieldMap::new(),
                _ => return Err(ParserError::invalid_entry(origin, key).into()),
            };
            file.entries.insert(key, fields);
        }

        trace!(collection, entries = file.len(), "parsed fixture file");
        Ok(file)
    }
}

fn scalar_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.strip_prefix(':').unwrap_or(s).to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_field_map(key: &str, mapping: serde_yaml::Mapping) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    for (name, value) in mapping {
        let name = scalar_key(&name)
            .ok_or_else(|| ParserError::invalid_field_name(key, format!("{name:?}")))?;
        fields.insert(name, parse_value(key, value)?);
    }
    Ok(fields)
}

/// Convert a YAML node into a tagged field value.
pub fn parse_value(key: &str, value: serde_yaml::Value) -> Result<FieldValue> {
    Ok(match value {
        serde_yaml::Value::Null => FieldValue::Absent,
        serde_yaml::Value::Bool(b) => FieldValue::Direct(Value::Bool(b)),
        serde_yaml::Value::Number(n) => FieldValue::Direct(
            number_to_json(&n).ok_or_else(|| ParserError::non_finite_number(key, n.to_string()))?,
        ),
        serde_yaml::Value::String(s) => match symbol(&s) {
            Some(target) => FieldValue::Reference(target.to_string()),
            None => FieldValue::Direct(Value::String(s)),
        },
        serde_yaml::Value::Sequence(items) => FieldValue::List(
            items
                .into_iter()
                .map(|item| parse_value(key, item))
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => FieldValue::Map(parse_field_map(key, mapping)?),
        serde_yaml::Value::Tagged(tagged) => parse_tagged(key, *tagged)?,
    })
}

fn parse_tagged(key: &str, tagged: TaggedValue) -> Result<FieldValue> {
    if tagged.tag == REFERENCE_TAG {
        if let Some(target) = scalar_key(&tagged.value) {
            return Ok(FieldValue::Reference(target));
        }
    }
    // unknown tags are transparent
    parse_value(key, tagged.value)
}

/// `:new_york` style symbol token.
fn symbol(s: &str) -> Option<&str> {
    let name = s.strip_prefix(':')?;
    let mut chars = name.chars();
    let first = chars.next()?;
    if (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Some(name)
    } else {
        None
    }
}

/// JSON has no NaN or infinity, so those have no plain form.
fn number_to_json(n: &serde_yaml::Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        Some(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Value::from(u))
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
    }
}
