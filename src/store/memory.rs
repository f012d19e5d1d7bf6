use std::collections::HashMap;

use tracing::trace;

use super::{matches_filter, Document, DocumentStore, Filter};
use crate::error::StoreError;
use crate::instance::{DocumentId, Instance};

#[derive(Debug, Clone)]
struct StoredRecord {
    id: DocumentId,
    document: Document,
    instance: Instance,
}

/// In-memory document store. Records are kept per class in save order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persisted documents of a class, in save order.
    pub fn documents(&self, class: &str) -> Vec<&Document> {
        self.records(class).iter().map(|r| &r.document).collect()
    }

    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        classes.sort_unstable();
        classes
    }

    pub fn clear(&mut self) {
        self.collections.clear();
    }

    fn records(&self, class: &str) -> &[StoredRecord] {
        self.collections
            .get(class)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl DocumentStore for MemoryStore {
    fn exists(&self, class: &str, filter: &Filter) -> Result<bool, StoreError> {
        Ok(self
            .records(class)
            .iter()
            .any(|r| matches_filter(&r.document, filter)))
    }

    fn find_first(&self, class: &str, filter: &Filter) -> Result<Option<Instance>, StoreError> {
        Ok(self
            .records(class)
            .iter()
            .find(|r| matches_filter(&r.document, filter))
            .map(|r| r.instance.clone()))
    }

    fn save(&mut self, instance: &Instance, document: Document) -> Result<(), StoreError> {
        let id = instance
            .id()
            .ok_or_else(|| StoreError::missing_identity(instance.class()))?;
        trace!(class = instance.class(), %id, "saving document");

        let records = self
            .collections
            .entry(instance.class().to_string())
            .or_default();
        let record = StoredRecord {
            id,
            document,
            instance: instance.clone(),
        };
        match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    fn count(&self, class: &str) -> usize {
        self.records(class).len()
    }

    fn document(&self, class: &str, id: &DocumentId) -> Option<&Document> {
        self.records(class)
            .iter()
            .find(|r| &r.id == id)
            .map(|r| &r.document)
    }
}
