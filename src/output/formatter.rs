use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::loader::persist::document_for;
use crate::loader::InstanceRegistry;
use crate::store::{Document, DocumentStore};

/// Persisted documents per loaded class, keyed by fixture key.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct SeedReport {
    classes: IndexMap<String, IndexMap<String, Document>>,
}

impl SeedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a loaded registry. Documents come from the store so a reused
    /// record shows what is actually persisted.
    pub fn add<S: DocumentStore + ?Sized>(&mut self, registry: &InstanceRegistry, store: &S) {
        let documents = registry
            .iter()
            .map(|(key, instance)| {
                let document = instance
                    .id()
                    .and_then(|id| store.document(instance.class(), &id))
                    .cloned()
                    .unwrap_or_else(|| document_for(instance));
                (key.to_string(), document)
            })
            .collect();
        self.classes.insert(registry.class().to_string(), documents);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn total_documents(&self) -> usize {
        self.classes.values().map(IndexMap::len).sum()
    }
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(report: &SeedReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }
}
