/// Constructed records and their attribute bags.
///
/// An [`Instance`] owns its embedded sub-documents outright and shares
/// references to other top-level instances through `Arc`, mirroring how a
/// document store keeps embedded documents inline and references by id.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Name of the identity attribute in persisted documents.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn to_value(self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of an attribute bag.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// Scalars, raw nested maps and raw lists.
    Value(Value),
    /// A single embedded document (embeds_one).
    Embedded(Box<Instance>),
    /// An ordered collection of embedded documents (embeds_many).
    EmbeddedList(Vec<Instance>),
}

impl Attribute {
    /// JSON form of the attribute, with embedded documents rendered without
    /// their identities.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Embedded(doc) => Value::Object(doc.attributes_document()),
            Self::EmbeddedList(docs) => Value::Array(
                docs.iter()
                    .map(|doc| Value::Object(doc.attributes_document()))
                    .collect(),
            ),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Back-reference from an embedded document to the document that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerLink {
    /// Inverse field on the embedded model (its `embedded_in` relation).
    pub field: String,
    pub class: String,
    pub id: Option<DocumentId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: String,
    id: Option<DocumentId>,
    attributes: IndexMap<String, Attribute>,
    references: IndexMap<String, Option<Arc<Instance>>>,
    owner: Option<OwnerLink>,
}

impl Instance {
    /// Create an instance with a fresh identity.
    pub fn new(class: impl Into<String>) -> Self {
        Self::with_id(class, Some(DocumentId::new()))
    }

    pub fn with_id(class: impl Into<String>, id: Option<DocumentId>) -> Self {
        Self {
            class: class.into(),
            id,
            attributes: IndexMap::new(),
            references: IndexMap::new(),
            owner: None,
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn id(&self) -> Option<DocumentId> {
        self.id
    }

    pub fn attributes(&self) -> &IndexMap<String, Attribute> {
        &self.attributes
    }

    pub fn attribute(&self, field: &str) -> Option<&Attribute> {
        self.attributes.get(field)
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field).and_then(Attribute::as_value)
    }

    pub fn str_value(&self, field: &str) -> Option<&str> {
        self.value(field).and_then(Value::as_str)
    }

    pub fn set_value(&mut self, field: impl Into<String>, value: Value) {
        self.attributes.insert(field.into(), Attribute::Value(value));
    }

    pub fn set_attribute(&mut self, field: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(field.into(), attribute);
    }

    pub fn embedded(&self, field: &str) -> Option<&Instance> {
        match self.attributes.get(field) {
            Some(Attribute::Embedded(doc)) => Some(doc),
            _ => None,
        }
    }

    pub fn embedded_list(&self, field: &str) -> &[Instance] {
        match self.attributes.get(field) {
            Some(Attribute::EmbeddedList(docs)) => docs,
            _ => &[],
        }
    }

    /// Append an embedded document to a list attribute, creating the list
    /// first if the field is unset or holds something else.
    pub fn push_embedded(&mut self, field: &str, doc: Instance) {
        match self.attributes.get_mut(field) {
            Some(Attribute::EmbeddedList(docs)) => docs.push(doc),
            _ => {
                self.attributes
                    .insert(field.to_string(), Attribute::EmbeddedList(vec![doc]));
            }
        }
    }

    /// Append raw values to a list attribute, creating the list first if absent.
    pub fn extend_values(&mut self, field: &str, values: Vec<Value>) {
        match self.attributes.get_mut(field) {
            Some(Attribute::Value(Value::Array(existing))) => existing.extend(values),
            _ => {
                self.attributes
                    .insert(field.to_string(), Attribute::Value(Value::Array(values)));
            }
        }
    }

    /// Referenced top-level instance for a relation field, if one is set.
    pub fn reference(&self, field: &str) -> Option<&Instance> {
        self.references
            .get(field)
            .and_then(|r| r.as_deref())
    }

    pub fn has_reference(&self, field: &str) -> bool {
        self.references.contains_key(field)
    }

    pub fn references(&self) -> impl Iterator<Item = (&str, Option<&Instance>)> {
        self.references
            .iter()
            .map(|(field, target)| (field.as_str(), target.as_deref()))
    }

    pub fn set_reference(&mut self, field: impl Into<String>, target: Option<Arc<Instance>>) {
        self.references.insert(field.into(), target);
    }

    pub fn owner(&self) -> Option<&OwnerLink> {
        self.owner.as_ref()
    }

    pub fn set_owner(&mut self, owner: OwnerLink) {
        self.owner = Some(owner);
    }

    /// Attribute bag as a JSON object, identities excluded at every level.
    pub fn attributes_document(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(name, _)| name.as_str() != ID_FIELD)
            .map(|(name, attribute)| (name.clone(), attribute.to_json()))
            .collect()
    }
}
