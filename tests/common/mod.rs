#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use docseed::{FixtureLoader, FixtureRegistry, InstanceRegistry, MemoryStore, Result, Schema};
use tempfile::TempDir;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn schema_path() -> PathBuf {
    fixtures_dir().join("schema").join("models.yml")
}

pub fn schema() -> Schema {
    Schema::from_file(schema_path()).unwrap()
}

pub fn sample_fixtures() -> FixtureRegistry {
    FixtureRegistry::from_dir(fixtures_dir()).unwrap()
}

/// Fixture directory holding the given `(file name, content)` pairs.
pub fn write_fixtures(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).unwrap();
    }
    temp_dir
}

pub fn load(
    fixtures: &FixtureRegistry,
    schema: &Schema,
    store: &mut MemoryStore,
    class: &str,
) -> Result<InstanceRegistry> {
    FixtureLoader::new(fixtures, schema, store).load(class)
}

pub fn load_from(dir: &Path, schema: &Schema, class: &str) -> (Result<InstanceRegistry>, MemoryStore) {
    let fixtures = FixtureRegistry::from_dir(dir).unwrap();
    let mut store = MemoryStore::new();
    let result = load(&fixtures, schema, &mut store, class);
    (result, store)
}
