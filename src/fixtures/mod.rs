//! Fixture files and the values they carry.
//!
//! A fixture file maps fixture keys to field maps. Field values are tagged:
//! plain data, a symbolic reference to another fixture, an explicit absence,
//! or nested lists and maps that may become embedded documents.

pub mod parser;
pub mod registry;
pub mod source;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;

pub use parser::FixtureParser;
pub use registry::FixtureRegistry;
pub use source::FixtureSource;

pub type FieldMap = IndexMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A scalar: string, number, boolean or date literal.
    Direct(Value),
    /// Key of a fixture in another collection.
    Reference(String),
    /// Explicitly no value.
    Absent,
    List(Vec<FieldValue>),
    Map(FieldMap),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Direct(_) => "scalar",
            Self::Reference(_) => "reference",
            Self::Absent => "null",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Plain JSON form of the value. References have no plain form, so the
    /// path of the first one found is returned as the error.
    pub fn to_raw(&self, path: &str) -> Result<Value, String> {
        match self {
            Self::Direct(value) => Ok(value.clone()),
            Self::Absent => Ok(Value::Null),
            Self::Reference(_) => Err(path.to_string()),
            Self::List(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| item.to_raw(&format!("{path}.{idx}")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Self::Map(fields) => fields
                .iter()
                .map(|(name, item)| {
                    item.to_raw(&format!("{path}.{name}"))
                        .map(|value| (name.clone(), value))
                })
                .collect::<Result<serde_json::Map<String, Value>, String>>()
                .map(Value::Object),
        }
    }
}

/// Parsed content of one fixture file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureFile {
    pub collection: String,
    pub source: Option<PathBuf>,
    pub entries: IndexMap<String, FieldMap>,
}

impl FixtureFile {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            source: None,
            entries: IndexMap::new(),
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, fields: FieldMap) -> Self {
        self.entries.insert(key.into(), fields);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldMap> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
