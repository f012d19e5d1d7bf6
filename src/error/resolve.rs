use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no fixture data found for collection '{collection}'")]
    FixtureDataMissing { collection: String },

    #[error("{class}.{field} holds a reference but its relation is {kind}; expected belongs_to or has_one")]
    InvalidReferenceRelation {
        class: String,
        field: String,
        kind: String,
    },

    #[error("{class}.{field} is embedded and must be a field map, found {found}")]
    MalformedEmbeddedValue {
        class: String,
        field: String,
        found: String,
    },

    #[error("embedded model '{class}' declares no embedded_in relation back to '{owner}'")]
    EmbedParentNotFound { class: String, owner: String },

    #[error("cyclic fixture reference: {}", .chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    #[error("fixture '{key}' not found for {class}")]
    FixtureKeyNotFound { class: String, key: String },
}

impl ResolveError {
    pub fn fixture_data_missing(collection: impl Into<String>) -> Self {
        Self::FixtureDataMissing {
            collection: collection.into(),
        }
    }

    pub fn invalid_reference_relation(
        class: impl Into<String>,
        field: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self::InvalidReferenceRelation {
            class: class.into(),
            field: field.into(),
            kind: kind.into(),
        }
    }

    pub fn malformed_embedded_value(
        class: impl Into<String>,
        field: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::MalformedEmbeddedValue {
            class: class.into(),
            field: field.into(),
            found: found.into(),
        }
    }

    pub fn embed_parent_not_found(class: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::EmbedParentNotFound {
            class: class.into(),
            owner: owner.into(),
        }
    }

    pub fn cyclic_reference(chain: Vec<String>) -> Self {
        Self::CyclicReference { chain }
    }

    pub fn fixture_key_not_found(class: impl Into<String>, key: impl Into<String>) -> Self {
        Self::FixtureKeyNotFound {
            class: class.into(),
            key: key.into(),
        }
    }
}
