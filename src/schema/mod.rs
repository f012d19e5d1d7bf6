/// Model metadata consumed by the fixture loader.
///
/// The schema plays three roles for the loader:
/// - relation metadata provider (`relations_of`, `relation`)
/// - instance factory (`instantiate`)
/// - write capability lookup (`transform`), replacing runtime setter probing
pub mod file;
pub mod model;
pub mod relation;
pub mod transform;

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::SchemaError;
use crate::instance::Instance;
use crate::utils::collection_name;

pub use model::ModelSchema;
pub use relation::{RelationDescriptor, RelationKind};
pub use transform::{FieldTransform, SharedTransform};

#[derive(Debug, Clone, Default)]
pub struct Schema {
    models: IndexMap<String, ModelSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from model declarations, checking that every parent
    /// exists and that inheritance is acyclic.
    pub fn from_models(models: impl IntoIterator<Item = ModelSchema>) -> Result<Self, SchemaError> {
        let mut schema = Self::new();
        for model in models {
            schema.models.insert(model.name().to_string(), model);
        }
        schema.validate()?;
        Ok(schema)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for model in self.models.values() {
            let mut seen = HashSet::new();
            let mut current = model;
            while let Some(parent) = current.parent() {
                if !seen.insert(current.name()) {
                    return Err(SchemaError::inheritance_cycle(model.name()));
                }
                current = self
                    .models
                    .get(parent)
                    .ok_or_else(|| SchemaError::unknown_parent(current.name(), parent))?;
            }
        }
        Ok(())
    }

    pub fn model(&self, class: &str) -> Result<&ModelSchema, SchemaError> {
        self.models
            .get(class)
            .ok_or_else(|| SchemaError::unknown_model(class))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.models.contains_key(class)
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelSchema> {
        self.models.values()
    }

    /// The model followed by its ancestors, nearest first.
    fn lineage<'a>(&'a self, class: &str) -> impl Iterator<Item = &'a ModelSchema> + 'a {
        let mut next = self.models.get(class);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent().and_then(|p| self.models.get(p));
            Some(current)
        })
    }

    /// Relations declared on the model and inherited from its ancestors.
    /// A field redeclared on a subclass shadows the inherited one.
    pub fn relations_of(&self, class: &str) -> IndexMap<String, RelationDescriptor> {
        let chain: Vec<_> = self.lineage(class).collect();
        let mut relations = IndexMap::new();
        for model in chain.iter().rev() {
            for (field, relation) in model.relations() {
                relations.insert(field.clone(), relation.clone());
            }
        }
        relations
    }

    pub fn relation(&self, class: &str, field: &str) -> Option<&RelationDescriptor> {
        self.lineage(class)
            .find_map(|model| model.relations().get(field))
    }

    pub fn transform(&self, class: &str, field: &str) -> Option<&SharedTransform> {
        self.lineage(class)
            .find_map(|model| model.transforms().get(field))
    }

    pub fn is_kind_of(&self, class: &str, ancestor: &str) -> bool {
        self.lineage(class).any(|model| model.name() == ancestor)
    }

    /// Fixture collection holding the model's entries.
    pub fn collection_name(&self, class: &str) -> String {
        self.models
            .get(class)
            .and_then(|m| m.collection())
            .map(str::to_string)
            .unwrap_or_else(|| collection_name(class))
    }

    /// Construct a new, empty instance of a declared model.
    pub fn instantiate(&self, class: &str) -> Result<Instance, SchemaError> {
        let model = self.model(class)?;
        trace!(class = model.name(), "instantiating");
        Ok(Instance::new(model.name()))
    }
}
