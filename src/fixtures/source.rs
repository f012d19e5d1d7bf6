use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{IoError, Result};

/// Conventional fixture directory, relative to the working directory.
pub const DEFAULT_FIXTURE_PATH: &str = "test/fixtures";

pub const FIXTURE_EXTENSIONS: &[&str] = &["yml", "yaml", "json"];

/// Where fixture files are looked up: a primary directory and at most one
/// alternate tried when the primary does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSource {
    pub path: PathBuf,
    pub fallback: Option<PathBuf>,
}

impl FixtureSource {
    /// A relative path also gets `../<path>` as its fallback, for test
    /// runners that start one directory below the project root.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let fallback = if path.is_relative() {
            Some(Path::new("..").join(&path))
        } else {
            None
        };
        Self { path, fallback }
    }

    /// Exactly this directory, with no fallback.
    pub fn exact(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback: None,
        }
    }

    pub fn candidates(&self) -> Vec<PathBuf> {
        std::iter::once(self.path.clone())
            .chain(self.fallback.clone())
            .collect()
    }

    /// First candidate that is an existing directory.
    pub fn discover(&self) -> Result<PathBuf> {
        let candidates = self.candidates();
        for candidate in &candidates {
            if candidate.is_dir() {
                debug!(path = %candidate.display(), "found fixture directory");
                return Ok(candidate.clone());
            }
        }
        Err(IoError::fixture_source_not_found(candidates).into())
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_PATH)
    }
}

/// Fixture files directly inside `root`, keyed by collection name.
///
/// Subdirectories are not searched. When two files share a stem (for
/// example `users.yml` and `users.json`) the first in name order wins.
pub fn index_fixture_files(root: &Path) -> Result<HashMap<String, PathBuf>> {
    if !root.is_dir() {
        return Err(IoError::invalid_path(root).into());
    }

    let mut files: HashMap<String, PathBuf> = HashMap::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| IoError::directory_scan_error(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let is_fixture = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| FIXTURE_EXTENSIONS.contains(&ext));
        if !is_fixture {
            continue;
        }

        let Some(collection) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if let Some(existing) = files.get(collection) {
            warn!(
                collection,
                kept = %existing.display(),
                ignored = %path.display(),
                "duplicate fixture file for collection"
            );
            continue;
        }
        files.insert(collection.to_string(), path.to_path_buf());
    }

    debug!(root = %root.display(), files = files.len(), "indexed fixture files");
    Ok(files)
}
