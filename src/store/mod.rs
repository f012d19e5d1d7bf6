//! Storage collaborator used by the persister.

mod memory;

use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::instance::{DocumentId, Instance};

pub use memory::MemoryStore;

/// A persisted record as stored by the backend.
pub type Document = Map<String, Value>;

/// Attribute filter: every entry must match. Dotted keys address fields of
/// nested documents.
pub type Filter = Map<String, Value>;

pub trait DocumentStore {
    fn exists(&self, class: &str, filter: &Filter) -> Result<bool, StoreError>;

    fn find_first(&self, class: &str, filter: &Filter) -> Result<Option<Instance>, StoreError>;

    /// Persist an instance together with its serialized document.
    fn save(&mut self, instance: &Instance, document: Document) -> Result<(), StoreError>;

    fn count(&self, class: &str) -> usize;

    fn document(&self, class: &str, id: &DocumentId) -> Option<&Document>;
}

/// Whether a stored document satisfies a filter.
///
/// A `null` filter value also matches a field that is missing entirely.
pub fn matches_filter(document: &Document, filter: &Filter) -> bool {
    filter.iter().all(|(key, expected)| {
        match lookup(document, key) {
            Some(actual) => actual == expected,
            None => expected.is_null(),
        }
    })
}

/// Resolve a possibly dotted key. An exact top-level match wins over a
/// nested path so keys that contain dots still work.
fn lookup<'a>(document: &'a Document, key: &str) -> Option<&'a Value> {
    if let Some(value) = document.get(key) {
        return Some(value);
    }

    let mut parts = key.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
