//! The seeding pipeline: fixture entries in, persisted instances out.
//!
//! [`FixtureLoader::load`] builds every entry of a class's fixture file,
//! loading referenced classes on demand, and hands each instance to the
//! store for deduplicated persistence.

pub mod assign;
mod embed;
pub mod persist;
mod resolve;
mod session;

use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, trace};

use crate::error::{ResolveError, Result};
use crate::fixtures::{FieldMap, FieldValue, FixtureRegistry};
use crate::instance::{Attribute, Instance};
use crate::schema::relation::kind_name;
use crate::schema::{RelationKind, Schema};
use crate::store::DocumentStore;

pub use session::LoadSession;

/// Whether a field map belongs to a fixture entry or to a document embedded
/// in one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldScope {
    Entry,
    Embedded,
}

/// Fixture key to persisted instance, in fixture file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceRegistry {
    class: String,
    instances: IndexMap<String, Arc<Instance>>,
}

impl InstanceRegistry {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            instances: IndexMap::new(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Instance>> {
        self.instances.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, instance: Arc<Instance>) {
        self.instances.insert(key.into(), instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Instance>)> {
        self.instances.iter().map(|(key, instance)| (key.as_str(), instance))
    }
}

impl Index<&str> for InstanceRegistry {
    type Output = Instance;

    fn index(&self, key: &str) -> &Instance {
        &self.instances[key]
    }
}

pub struct FixtureLoader<'a, S: DocumentStore> {
    fixtures: &'a FixtureRegistry,
    schema: &'a Schema,
    store: &'a mut S,
}

impl<'a, S: DocumentStore> FixtureLoader<'a, S> {
    pub fn new(fixtures: &'a FixtureRegistry, schema: &'a Schema, store: &'a mut S) -> Self {
        Self {
            fixtures,
            schema,
            store,
        }
    }

    /// Build and persist every fixture of `class`.
    ///
    /// Each call starts a fresh call tree: classes referenced along the way
    /// are loaded once for this call and reused by every entry that needs
    /// them. Records already in the store are reused instead of duplicated.
    pub fn load(&mut self, class: &str) -> Result<InstanceRegistry> {
        let registry = self.load_in(&mut LoadSession::new(), class)?;
        info!(class, instances = registry.len(), "loaded fixtures");
        Ok(Arc::unwrap_or_clone(registry))
    }

    /// Load `class` within an existing call tree.
    pub fn load_in(
        &mut self,
        session: &mut LoadSession,
        class: &str,
    ) -> Result<Arc<InstanceRegistry>> {
        if let Some(registry) = session.registry(class) {
            trace!(class, "reusing registry from this load");
            return Ok(registry);
        }

        session.enter(class)?;
        let result = self.build_registry(session, class);
        session.exit(class);

        let registry = Arc::new(result?);
        session.record(Arc::clone(&registry));
        Ok(registry)
    }

    fn build_registry(&mut self, session: &mut LoadSession, class: &str) -> Result<InstanceRegistry> {
        let schema = self.schema;
        schema.model(class)?;

        let collection = schema.collection_name(class);
        let file = self.fixtures.get(&collection)?;
        debug!(class, collection = %collection, entries = file.len(), "building fixtures");

        let mut registry = InstanceRegistry::new(class);
        for (key, fields) in &file.entries {
            trace!(class, key = %key, "building fixture");
            let mut instance = schema.instantiate(class)?;
            self.populate(session, &mut instance, fields, FieldScope::Entry)?;
            let persisted = persist::save_or_reuse(&mut *self.store, instance)?;
            registry.insert(key.clone(), Arc::new(persisted));
        }
        Ok(registry)
    }

    /// Apply every field of a fixture entry, in entry order.
    pub(crate) fn populate(
        &mut self,
        session: &mut LoadSession,
        instance: &mut Instance,
        fields: &FieldMap,
        scope: FieldScope,
    ) -> Result<()> {
        for (field, value) in fields {
            self.apply_field(session, instance, field, value, scope)?;
        }
        Ok(())
    }

    fn apply_field(
        &mut self,
        session: &mut LoadSession,
        instance: &mut Instance,
        field: &str,
        value: &FieldValue,
        scope: FieldScope,
    ) -> Result<()> {
        let schema = self.schema;
        let relation = schema.relation(instance.class(), field);
        trace!(
            class = instance.class(),
            field,
            value = value.kind(),
            relation = kind_name(relation),
            "applying field"
        );

        // embedded documents take an explicit null on a plain field as a value
        let references = relation.is_some_and(|r| r.kind.accepts_reference());
        if scope == FieldScope::Embedded && *value == FieldValue::Absent && !references {
            assign::assign(schema, instance, field, serde_json::Value::Null);
            return Ok(());
        }

        let embedding = relation.filter(|r| r.kind.is_embedding());
        match (value, embedding) {
            (FieldValue::Reference(_) | FieldValue::Absent, _) => {
                self.resolve_reference(session, instance, field, value, relation)
            }
            (FieldValue::List(items), Some(relation)) => {
                let docs = self.build_embedded_many(session, instance, field, relation, items)?;
                if docs.is_empty() && instance.attribute(field).is_none() {
                    instance.set_attribute(field, Attribute::EmbeddedList(Vec::new()));
                }
                for doc in docs {
                    instance.push_embedded(field, doc);
                }
                Ok(())
            }
            (FieldValue::List(items), None) => {
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| raw_value(instance, &format!("{field}.{idx}"), item))
                    .collect::<Result<Vec<_>>>()?;
                instance.extend_values(field, values);
                Ok(())
            }
            (FieldValue::Map(_), Some(relation)) => {
                let doc = self.build_embedded(session, instance, field, relation, value)?;
                match relation.kind {
                    RelationKind::EmbedsMany => instance.push_embedded(field, doc),
                    _ => instance.set_attribute(field, Attribute::Embedded(Box::new(doc))),
                }
                Ok(())
            }
            (FieldValue::Map(_), None) => {
                let raw = raw_value(instance, field, value)?;
                instance.set_value(field, raw);
                Ok(())
            }
            (FieldValue::Direct(_), Some(_)) => Err(ResolveError::malformed_embedded_value(
                instance.class(),
                field,
                value.kind(),
            )
            .into()),
            (FieldValue::Direct(raw), None) => {
                assign::assign(schema, instance, field, raw.clone());
                Ok(())
            }
        }
    }
}

/// Models worth loading on their own: declared, not embedded-only, and
/// backed by a fixture collection. Schema order is kept.
pub fn seedable_classes(schema: &Schema, fixtures: &FixtureRegistry) -> Vec<String> {
    schema
        .models()
        .filter(|model| !model.is_embedded())
        .filter(|model| fixtures.contains(&schema.collection_name(model.name())))
        .map(|model| model.name().to_string())
        .collect()
}

/// Plain JSON for a value stored without relation semantics. A reference
/// nested inside it has no relation to resolve through.
fn raw_value(instance: &Instance, path: &str, value: &FieldValue) -> Result<serde_json::Value> {
    value.to_raw(path).map_err(|at| {
        ResolveError::invalid_reference_relation(instance.class(), at, kind_name(None)).into()
    })
}
