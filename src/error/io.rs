use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("unable to find fixtures in any of: {}", display_paths(.candidates))]
    FixtureSourceNotFound { candidates: Vec<PathBuf> },

    #[error("failed to read file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to scan directory at {path}: {source}")]
    DirectoryScanError {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("path is not a directory: {path}")]
    InvalidPath { path: PathBuf },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl IoError {
    pub fn fixture_source_not_found(candidates: Vec<PathBuf>) -> Self {
        Self::FixtureSourceNotFound { candidates }
    }

    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    pub fn directory_scan_error(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::DirectoryScanError {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_source_not_found_display() {
        let err = IoError::fixture_source_not_found(vec![
            PathBuf::from("test/fixtures"),
            PathBuf::from("../test/fixtures"),
        ]);
        assert_eq!(
            err.to_string(),
            "unable to find fixtures in any of: test/fixtures, ../test/fixtures"
        );
    }

    #[test]
    fn test_invalid_path_display() {
        let err = IoError::invalid_path("/path/to/file.yml");
        assert_eq!(err.to_string(), "path is not a directory: /path/to/file.yml");
    }

    #[test]
    fn test_read_error_display() {
        let source = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = IoError::read_error("states.yml", source);
        assert!(err.to_string().starts_with("failed to read file 'states.yml'"));
    }
}
