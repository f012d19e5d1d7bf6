use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{FixtureLoader, LoadSession};
use crate::error::{ResolveError, Result};
use crate::fixtures::FieldValue;
use crate::instance::Instance;
use crate::schema::relation::kind_name;
use crate::schema::{RelationDescriptor, RelationKind};
use crate::store::DocumentStore;

impl<S: DocumentStore> FixtureLoader<'_, S> {
    /// Point a relation field at another fixture, or clear it for an
    /// explicit absence.
    ///
    /// Only `belongs_to` and `has_one` fields take references. The target
    /// class is loaded either way, so an absent value still seeds it.
    pub(crate) fn resolve_reference(
        &mut self,
        session: &mut LoadSession,
        instance: &mut Instance,
        field: &str,
        value: &FieldValue,
        relation: Option<&RelationDescriptor>,
    ) -> Result<()> {
        let relation = match relation {
            Some(relation) if relation.kind.accepts_reference() => relation,
            other => {
                return Err(ResolveError::invalid_reference_relation(
                    instance.class(),
                    field,
                    kind_name(other),
                )
                .into())
            }
        };

        let key = match value {
            FieldValue::Reference(key) => Some(key.as_str()),
            _ => None,
        };
        let target = self.resolve(session, relation, key)?;
        debug!(
            class = instance.class(),
            field,
            to = %relation.class,
            key,
            "resolved reference"
        );

        if relation.kind == RelationKind::BelongsTo {
            let id = target
                .as_ref()
                .and_then(|t| t.id())
                .map(|id| id.to_value())
                .unwrap_or(Value::Null);
            instance.set_value(relation.foreign_key_for(field), id);
        }
        instance.set_reference(field, target);
        Ok(())
    }

    /// Instance for `key` from the target class's registry, loading the
    /// class first if this call tree has not built it yet.
    pub(crate) fn resolve(
        &mut self,
        session: &mut LoadSession,
        relation: &RelationDescriptor,
        key: Option<&str>,
    ) -> Result<Option<Arc<Instance>>> {
        let registry = self.load_in(session, &relation.class)?;
        let Some(key) = key else {
            return Ok(None);
        };
        registry
            .get(key)
            .cloned()
            .map(Some)
            .ok_or_else(|| ResolveError::fixture_key_not_found(&relation.class, key).into())
    }
}
