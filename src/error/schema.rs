use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read schema file '{path}': {message}")]
    SchemaFileReadError { path: PathBuf, message: String },

    #[error("failed to parse schema file '{path}': {message}")]
    SchemaParseError { path: PathBuf, message: String },

    #[error("model '{class}' is not defined in the schema")]
    UnknownModel { class: String },

    #[error("model '{class}' extends undefined model '{parent}'")]
    UnknownParent { class: String, parent: String },

    #[error("model '{class}' inherits from itself")]
    InheritanceCycle { class: String },

    #[error("unknown write transform '{name}' on {class}.{field}")]
    UnknownTransform {
        class: String,
        field: String,
        name: String,
    },

    #[error("unknown relation kind '{kind}' on {class}.{field}")]
    UnknownRelationKind {
        class: String,
        field: String,
        kind: String,
    },
}

impl SchemaError {
    pub fn schema_file_read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaFileReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn schema_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unknown_model(class: impl Into<String>) -> Self {
        Self::UnknownModel {
            class: class.into(),
        }
    }

    pub fn unknown_parent(class: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnknownParent {
            class: class.into(),
            parent: parent.into(),
        }
    }

    pub fn inheritance_cycle(class: impl Into<String>) -> Self {
        Self::InheritanceCycle {
            class: class.into(),
        }
    }

    pub fn unknown_transform(
        class: impl Into<String>,
        field: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::UnknownTransform {
            class: class.into(),
            field: field.into(),
            name: name.into(),
        }
    }

    pub fn unknown_relation_kind(
        class: impl Into<String>,
        field: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self::UnknownRelationKind {
            class: class.into(),
            field: field.into(),
            kind: kind.into(),
        }
    }
}
