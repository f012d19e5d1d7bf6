use std::sync::Arc;

use indexmap::IndexMap;

use super::relation::{RelationDescriptor, RelationKind};
use super::transform::{FieldTransform, SharedTransform};

/// Declaration of one model: its relations, write transforms and where its
/// fixtures live.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    collection: Option<String>,
    parent: Option<String>,
    relations: IndexMap<String, RelationDescriptor>,
    transforms: IndexMap<String, SharedTransform>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: None,
            parent: None,
            relations: IndexMap::new(),
            transforms: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn relations(&self) -> &IndexMap<String, RelationDescriptor> {
        &self.relations
    }

    pub fn transforms(&self) -> &IndexMap<String, SharedTransform> {
        &self.transforms
    }

    /// Store fixtures for this model under a collection name other than the
    /// pluralized class name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Inherit relations and transforms from another model.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn relation(mut self, field: impl Into<String>, relation: RelationDescriptor) -> Self {
        self.relations.insert(field.into(), relation);
        self
    }

    pub fn belongs_to(self, field: impl Into<String>, class: impl Into<String>) -> Self {
        self.relation(field, RelationDescriptor::new(RelationKind::BelongsTo, class))
    }

    pub fn has_one(self, field: impl Into<String>, class: impl Into<String>) -> Self {
        self.relation(field, RelationDescriptor::new(RelationKind::HasOne, class))
    }

    pub fn has_many(self, field: impl Into<String>, class: impl Into<String>) -> Self {
        self.relation(field, RelationDescriptor::new(RelationKind::HasMany, class))
    }

    pub fn embeds_one(self, field: impl Into<String>, class: impl Into<String>) -> Self {
        self.relation(field, RelationDescriptor::new(RelationKind::EmbedsOne, class))
    }

    pub fn embeds_many(self, field: impl Into<String>, class: impl Into<String>) -> Self {
        self.relation(field, RelationDescriptor::new(RelationKind::EmbedsMany, class))
    }

    pub fn embedded_in(self, field: impl Into<String>, class: impl Into<String>) -> Self {
        self.relation(field, RelationDescriptor::new(RelationKind::EmbeddedIn, class))
    }

    pub fn transform(
        mut self,
        field: impl Into<String>,
        transform: impl FieldTransform + 'static,
    ) -> Self {
        self.transforms.insert(field.into(), Arc::new(transform));
        self
    }

    pub fn shared_transform(mut self, field: impl Into<String>, transform: SharedTransform) -> Self {
        self.transforms.insert(field.into(), transform);
        self
    }

    /// True when this model is only ever stored inside another document.
    pub fn is_embedded(&self) -> bool {
        self.relations
            .values()
            .any(|r| r.kind == RelationKind::EmbeddedIn)
    }
}
