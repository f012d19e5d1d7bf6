use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::source::{index_fixture_files, FixtureSource};
use super::{FixtureFile, FixtureParser};
use crate::error::{ResolveError, Result};

/// Parsed fixture data, one [`FixtureFile`] per collection.
///
/// The fixture directory is located once, when the registry is built. Files
/// are parsed on first request and kept for the registry's lifetime, so a
/// test harness builds one registry and hands it to every load.
#[derive(Debug, Default)]
pub struct FixtureRegistry {
    root: Option<PathBuf>,
    files: HashMap<String, PathBuf>,
    cache: RefCell<HashMap<String, Arc<FixtureFile>>>,
    parser: FixtureParser,
}

impl FixtureRegistry {
    /// Locate the fixture directory and index the files in it.
    pub fn discover(source: &FixtureSource) -> Result<Self> {
        let root = source.discover()?;
        Self::from_dir(root)
    }

    pub fn from_dir(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let files = index_fixture_files(&root)?;
        Ok(Self {
            root: Some(root),
            files,
            ..Self::default()
        })
    }

    /// A registry with no backing directory, populated through [`Self::insert`].
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Register already-parsed fixture data, replacing any cached copy.
    pub fn insert(&self, file: FixtureFile) {
        self.cache
            .borrow_mut()
            .insert(file.collection.clone(), Arc::new(file));
    }

    pub fn contains(&self, collection: &str) -> bool {
        self.files.contains_key(collection) || self.cache.borrow().contains_key(collection)
    }

    /// Every collection that has data, sorted by name.
    pub fn collections(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .keys()
            .chain(self.cache.borrow().keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Fixture data for a collection, parsing its file on first access.
    pub fn get(&self, collection: &str) -> Result<Arc<FixtureFile>> {
        if let Some(file) = self.cache.borrow().get(collection) {
            return Ok(Arc::clone(file));
        }

        let path = self
            .files
            .get(collection)
            .ok_or_else(|| ResolveError::fixture_data_missing(collection))?;

        let file = Arc::new(self.parser.parse_file(path)?);
        debug!(
            collection,
            entries = file.len(),
            path = %path.display(),
            "loaded fixture collection"
        );
        self.cache
            .borrow_mut()
            .insert(collection.to_string(), Arc::clone(&file));
        Ok(file)
    }
}
