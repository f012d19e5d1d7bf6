use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, trace};

use super::relation::{RelationDescriptor, RelationKind};
use super::transform;
use super::{ModelSchema, Schema};
use crate::error::SchemaError;

#[derive(Debug, Deserialize)]
struct SchemaFile {
    models: IndexMap<String, ModelEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ModelEntry {
    extends: Option<String>,
    collection: Option<String>,
    relations: IndexMap<String, RelationEntry>,
    transforms: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RelationEntry {
    kind: String,
    class: String,
    #[serde(default)]
    inverse: Option<String>,
    #[serde(default)]
    foreign_key: Option<String>,
}

impl Schema {
    /// Load model declarations from a YAML schema file.
    ///
    /// ```yaml
    /// models:
    ///   City:
    ///     extends: GeopoliticalDivision
    ///     relations:
    ///       state: { kind: belongs_to, class: State }
    ///   User:
    ///     transforms:
    ///       password: sha256
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        trace!(path = %path.display(), "loading schema");

        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::schema_file_read_error(path, e.to_string()))?;

        let schema = Self::from_yaml_str(&content).map_err(|e| match e {
            SchemaError::SchemaParseError { message, .. } => {
                SchemaError::schema_parse_error(path, message)
            }
            other => other,
        })?;

        debug!(models = schema.models.len(), "loaded schema");
        Ok(schema)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        let file: SchemaFile = serde_yaml::from_str(content)
            .map_err(|e| SchemaError::schema_parse_error("<schema>", e.to_string()))?;

        let models = file
            .models
            .into_iter()
            .map(|(name, entry)| entry.into_model(name))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_models(models)
    }
}

impl ModelEntry {
    fn into_model(self, name: String) -> Result<ModelSchema, SchemaError> {
        let mut model = ModelSchema::new(name.clone());
        if let Some(parent) = self.extends {
            model = model.extends(parent);
        }
        if let Some(collection) = self.collection {
            model = model.with_collection(collection);
        }

        for (field, entry) in self.relations {
            let kind = RelationKind::parse(&entry.kind)
                .ok_or_else(|| SchemaError::unknown_relation_kind(&name, &field, &entry.kind))?;
            let mut relation = RelationDescriptor::new(kind, entry.class);
            relation.inverse = entry.inverse;
            relation.foreign_key = entry.foreign_key;
            model = model.relation(field, relation);
        }

        for (field, transform_name) in self.transforms {
            let shared = transform::builtin(&transform_name)
                .ok_or_else(|| SchemaError::unknown_transform(&name, &field, &transform_name))?;
            model = model.shared_transform(field, shared);
        }

        Ok(model)
    }
}
