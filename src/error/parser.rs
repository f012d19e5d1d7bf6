use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("invalid YAML in {path}: {message}")]
    InvalidYaml { path: PathBuf, message: String },

    #[error("fixture file {path} must contain a mapping of fixture keys to entries")]
    NotAMapping { path: PathBuf },

    #[error("invalid fixture key in {path}: {key}")]
    InvalidFixtureKey { path: PathBuf, key: String },

    #[error("fixture '{key}' in {path} is not a field map")]
    InvalidEntry { path: PathBuf, key: String },

    #[error("invalid field name in fixture '{key}': {field}")]
    InvalidFieldName { key: String, field: String },

    #[error("fixture '{key}' has a non-finite number: {value}")]
    NonFiniteNumber { key: String, value: String },
}

impl ParserError {
    pub fn invalid_yaml(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidYaml {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn not_a_mapping(path: impl Into<PathBuf>) -> Self {
        Self::NotAMapping { path: path.into() }
    }

    pub fn invalid_fixture_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self::InvalidFixtureKey {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn invalid_entry(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self::InvalidEntry {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn invalid_field_name(key: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidFieldName {
            key: key.into(),
            field: field.into(),
        }
    }

    pub fn non_finite_number(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NonFiniteNumber {
            key: key.into(),
            value: value.into(),
        }
    }
}
