use tracing::trace;

use super::{FieldScope, FixtureLoader, LoadSession};
use crate::error::{ResolveError, Result};
use crate::fixtures::FieldValue;
use crate::instance::{Instance, OwnerLink};
use crate::schema::{RelationDescriptor, RelationKind};
use crate::store::DocumentStore;

impl<S: DocumentStore> FixtureLoader<'_, S> {
    /// Build one embedded document from a fixture map and link it back to
    /// its owner.
    pub(crate) fn build_embedded(
        &mut self,
        session: &mut LoadSession,
        owner: &Instance,
        field: &str,
        relation: &RelationDescriptor,
        value: &FieldValue,
    ) -> Result<Instance> {
        let FieldValue::Map(fields) = value else {
            return Err(
                ResolveError::malformed_embedded_value(owner.class(), field, value.kind()).into(),
            );
        };

        let mut doc = self.schema.instantiate(&relation.class)?;
        self.populate(session, &mut doc, fields, FieldScope::Embedded)?;

        let inverse = self.inverse_field(owner.class(), relation)?;
        trace!(
            owner = owner.class(),
            field,
            embedded = doc.class(),
            inverse = %inverse,
            "linked embedded document"
        );
        doc.set_owner(OwnerLink {
            field: inverse,
            class: owner.class().to_string(),
            id: owner.id(),
        });
        Ok(doc)
    }

    /// Build every element of an embedded list, in order.
    pub(crate) fn build_embedded_many(
        &mut self,
        session: &mut LoadSession,
        owner: &Instance,
        field: &str,
        relation: &RelationDescriptor,
        items: &[FieldValue],
    ) -> Result<Vec<Instance>> {
        items
            .iter()
            .map(|item| self.build_embedded(session, owner, field, relation, item))
            .collect()
    }

    /// Field on the embedded model that points back at the owner: the
    /// declared inverse, else the first `embedded_in` relation whose target
    /// the owner class is, or inherits from.
    fn inverse_field(&self, owner_class: &str, relation: &RelationDescriptor) -> Result<String> {
        if let Some(inverse) = &relation.inverse {
            return Ok(inverse.clone());
        }

        self.schema
            .relations_of(&relation.class)
            .into_iter()
            .find(|(_, candidate)| {
                candidate.kind == RelationKind::EmbeddedIn
                    && self.schema.is_kind_of(owner_class, &candidate.class)
            })
            .map(|(field, _)| field)
            .ok_or_else(|| ResolveError::embed_parent_not_found(&relation.class, owner_class).into())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, ResolveError};
    use crate::fixtures::{FieldMap, FieldValue, FixtureFile, FixtureRegistry};
    use crate::loader::FixtureLoader;
    use crate::schema::{ModelSchema, RelationDescriptor, RelationKind, Schema};
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(fields: Vec<(&str, FieldValue)>) -> FieldMap {
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    fn direct(value: serde_json::Value) -> FieldValue {
        FieldValue::Direct(value)
    }

    fn schema() -> Schema {
        Schema::from_models([
            ModelSchema::new("GeopoliticalDivision")
                .embeds_one("population", "Population")
                .embeds_many("people", "Person"),
            ModelSchema::new("City").extends("GeopoliticalDivision"),
            ModelSchema::new("Population")
                .embedded_in("geopolitical_division", "GeopoliticalDivision"),
            ModelSchema::new("Person").embedded_in("geopolitical_division", "GeopoliticalDivision"),
        ])
        .unwrap()
    }

    fn load_city(schema: &Schema, fields: FieldMap) -> crate::error::Result<crate::loader::InstanceRegistry> {
        let fixtures = FixtureRegistry::in_memory();
        fixtures.insert(FixtureFile::new("cities").with_entry("new_york_city", fields));
        let mut store = MemoryStore::new();
        FixtureLoader::new(&fixtures, schema, &mut store).load("City")
    }

    #[test]
    fn test_embeds_one_links_owner() {
        let schema = schema();
        let cities = load_city(
            &schema,
            map(vec![(
                "population",
                FieldValue::Map(map(vec![("total", direct(json!(8_000_000)))])),
            )]),
        )
        .unwrap();

        let city = &cities["new_york_city"];
        let population = city.embedded("population").unwrap();
        assert_eq!(population.value("total"), Some(&json!(8_000_000)));

        let owner = population.owner().unwrap();
        assert_eq!(owner.field, "geopolitical_division");
        assert_eq!(owner.class, "City");
        assert_eq!(owner.id, city.id());
    }

    #[test]
    fn test_embeds_many_keeps_order() {
        let schema = schema();
        let cities = load_city(
            &schema,
            map(vec![(
                "people",
                FieldValue::List(vec![
                    FieldValue::Map(map(vec![("first_name", direct(json!("Christopher")))])),
                    FieldValue::Map(map(vec![("first_name", direct(json!("Marie")))])),
                ]),
            )]),
        )
        .unwrap();

        let names: Vec<_> = cities["new_york_city"]
            .embedded_list("people")
            .iter()
            .map(|p| p.str_value("first_name").unwrap())
            .collect();
        assert_eq!(names, vec!["Christopher", "Marie"]);
    }

    #[test]
    fn test_null_field_in_embedded_document() {
        let schema = schema();
        let cities = load_city(
            &schema,
            map(vec![(
                "people",
                FieldValue::List(vec![FieldValue::Map(map(vec![
                    ("first_name", direct(json!("Christopher"))),
                    ("suffix", FieldValue::Absent),
                ]))]),
            )]),
        )
        .unwrap();

        let people = cities["new_york_city"].embedded_list("people");
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].value("suffix"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_single_map_appends_to_embeds_many() {
        let schema = schema();
        let cities = load_city(
            &schema,
            map(vec![(
                "people",
                FieldValue::Map(map(vec![("first_name", direct(json!("Christopher")))])),
            )]),
        )
        .unwrap();
        assert_eq!(cities["new_york_city"].embedded_list("people").len(), 1);
    }

    #[test]
    fn test_scalar_for_embedded_field_rejected() {
        let schema = schema();
        let result = load_city(&schema, map(vec![("population", direct(json!(8_000_000)))]));
        match result {
            Err(Error::Resolve(ResolveError::MalformedEmbeddedValue { field, found, .. })) => {
                assert_eq!(field, "population");
                assert_eq!(found, "scalar");
            }
            other => panic!("expected malformed value, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_list_element_rejected() {
        let schema = schema();
        let result = load_city(
            &schema,
            map(vec![("people", FieldValue::List(vec![direct(json!("Christopher"))]))]),
        );
        assert!(matches!(
            result,
            Err(Error::Resolve(ResolveError::MalformedEmbeddedValue { .. }))
        ));
    }

    #[test]
    fn test_missing_embedded_in() {
        let schema = Schema::from_models([
            ModelSchema::new("City").embeds_one("population", "Population"),
            ModelSchema::new("Population"),
        ])
        .unwrap();
        let result = load_city(
            &schema,
            map(vec![(
                "population",
                FieldValue::Map(map(vec![("total", direct(json!(1)))])),
            )]),
        );
        match result {
            Err(Error::Resolve(ResolveError::EmbedParentNotFound { class, owner })) => {
                assert_eq!(class, "Population");
                assert_eq!(owner, "City");
            }
            other => panic!("expected missing parent, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_inverse_wins() {
        let schema = Schema::from_models([
            ModelSchema::new("City").relation(
                "population",
                RelationDescriptor::new(RelationKind::EmbedsOne, "Population").with_inverse("place"),
            ),
            ModelSchema::new("Population"),
        ])
        .unwrap();
        let cities = load_city(
            &schema,
            map(vec![(
                "population",
                FieldValue::Map(map(vec![("total", direct(json!(1)))])),
            )]),
        )
        .unwrap();
        let population = cities["new_york_city"].embedded("population").unwrap();
        assert_eq!(population.owner().unwrap().field, "place");
    }
}
