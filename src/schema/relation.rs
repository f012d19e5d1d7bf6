use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    BelongsTo,
    HasOne,
    HasMany,
    EmbedsOne,
    EmbedsMany,
    EmbeddedIn,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelongsTo => "belongs_to",
            Self::HasOne => "has_one",
            Self::HasMany => "has_many",
            Self::EmbedsOne => "embeds_one",
            Self::EmbedsMany => "embeds_many",
            Self::EmbeddedIn => "embedded_in",
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "belongs_to" => Some(Self::BelongsTo),
            "has_one" => Some(Self::HasOne),
            "has_many" => Some(Self::HasMany),
            "embeds_one" => Some(Self::EmbedsOne),
            "embeds_many" => Some(Self::EmbedsMany),
            "embedded_in" => Some(Self::EmbeddedIn),
            _ => None,
        }
    }

    /// Kinds whose field may hold a symbolic reference or an explicit none.
    pub fn accepts_reference(&self) -> bool {
        matches!(self, Self::BelongsTo | Self::HasOne)
    }

    pub fn is_embedding(&self) -> bool {
        matches!(self, Self::EmbedsOne | Self::EmbedsMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation metadata for one (class, field) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDescriptor {
    pub kind: RelationKind,
    /// Target model of the relation.
    pub class: String,
    /// For embeds_* relations, the owner field on the embedded model.
    pub inverse: Option<String>,
    /// For belongs_to relations, overrides the `<field>_id` key.
    pub foreign_key: Option<String>,
}

impl RelationDescriptor {
    pub fn new(kind: RelationKind, class: impl Into<String>) -> Self {
        Self {
            kind,
            class: class.into(),
            inverse: None,
            foreign_key: None,
        }
    }

    pub fn with_inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }

    pub fn with_foreign_key(mut self, key: impl Into<String>) -> Self {
        self.foreign_key = Some(key.into());
        self
    }

    /// Attribute that stores the referenced identity.
    pub fn foreign_key_for(&self, field: &str) -> String {
        self.foreign_key
            .clone()
            .unwrap_or_else(|| format!("{field}_id"))
    }
}

/// Display name for a possibly missing relation, as used in error messages.
pub fn kind_name(relation: Option<&RelationDescriptor>) -> &'static str {
    relation.map(|r| r.kind.as_str()).unwrap_or("none")
}
