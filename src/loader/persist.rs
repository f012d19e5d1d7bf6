//! Deduplicating persistence.
//!
//! Before an instance is saved, its attributes are flattened into a store
//! filter. A stored record that matches is reused and nothing is written,
//! which makes repeated loads against the same store idempotent.

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::instance::{Attribute, Instance, ID_FIELD};
use crate::store::{Document, DocumentStore, Filter};

/// Store filter describing an instance's attributes.
///
/// Scalars match by key. A raw nested map contributes `parent.child` keys
/// and an embedded document contributes `<lowercased class>.<child>` keys.
/// Lists of any kind are left out, as are identities.
pub fn flatten_attributes(instance: &Instance) -> Filter {
    let mut filter = Filter::new();
    for (name, attribute) in instance.attributes() {
        if name == ID_FIELD {
            continue;
        }
        match attribute {
            Attribute::Value(Value::Array(_)) | Attribute::EmbeddedList(_) => {}
            Attribute::Value(Value::Object(map)) => {
                for (child, value) in map {
                    filter.insert(format!("{name}.{child}"), value.clone());
                }
            }
            Attribute::Value(value) => {
                filter.insert(name.clone(), value.clone());
            }
            Attribute::Embedded(doc) => {
                let prefix = doc.class().to_lowercase();
                for (child, value) in doc.attributes() {
                    if child == ID_FIELD {
                        continue;
                    }
                    filter.insert(format!("{prefix}.{child}"), value.to_json());
                }
            }
        }
    }
    filter
}

/// Copy embedded documents' identities into their serialized forms, at
/// every nesting level. Elements without an identity are left alone.
pub fn insert_embedded_ids(instance: &Instance, document: &mut Document) {
    for (name, attribute) in instance.attributes() {
        match (attribute, document.get_mut(name)) {
            (Attribute::Embedded(doc), Some(Value::Object(serialized))) => {
                tag_embedded(doc, serialized);
            }
            (Attribute::EmbeddedList(docs), Some(Value::Array(items))) => {
                for (doc, item) in docs.iter().zip(items.iter_mut()) {
                    if let Value::Object(serialized) = item {
                        tag_embedded(doc, serialized);
                    }
                }
            }
            _ => {}
        }
    }
}

fn tag_embedded(doc: &Instance, serialized: &mut Document) {
    if let Some(id) = doc.id() {
        serialized.insert(ID_FIELD.to_string(), id.to_value());
    }
    insert_embedded_ids(doc, serialized);
}

/// Serialized form of a top-level instance, identity first.
pub fn document_for(instance: &Instance) -> Document {
    let mut document = Document::new();
    if let Some(id) = instance.id() {
        document.insert(ID_FIELD.to_string(), id.to_value());
    }
    document.extend(instance.attributes_document());
    insert_embedded_ids(instance, &mut document);
    document
}

/// Return the stored record matching `instance`, or save `instance` and
/// return it.
pub fn save_or_reuse<S: DocumentStore + ?Sized>(store: &mut S, instance: Instance) -> Result<Instance> {
    let class = instance.class().to_string();
    let filter = flatten_attributes(&instance);

    if store.exists(&class, &filter)? {
        if let Some(existing) = store.find_first(&class, &filter)? {
            debug!(
                class = %class,
                id = ?existing.id().map(|id| id.to_string()),
                "reusing stored record"
            );
            return Ok(existing);
        }
    }

    let document = document_for(&instance);
    store.save(&instance, document)?;
    debug!(
        class = %class,
        id = ?instance.id().map(|id| id.to_string()),
        "saved record"
    );
    Ok(instance)
}
