use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Write-side transformation applied when a field is assigned.
///
/// A model field with a transform behaves like a custom setter: the fixture
/// value is passed through [`FieldTransform::apply`] before it reaches the
/// attribute bag.
pub trait FieldTransform: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, value: Value) -> Value;
}

impl<F> FieldTransform for F
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn apply(&self, value: Value) -> Value {
        self(value)
    }
}

pub type SharedTransform = Arc<dyn FieldTransform>;

impl fmt::Debug for dyn FieldTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldTransform({})", self.name())
    }
}

/// Hex SHA-256 digest of the value's string form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl FieldTransform for Sha256Digest {
    fn name(&self) -> &str {
        "sha256"
    }

    fn apply(&self, value: Value) -> Value {
        let text = match &value {
            Value::Null => return value,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Value::String(hex::encode(Sha256::digest(text.as_bytes())))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum StringCase {
    Lower,
    Upper,
    Trim,
}

impl FieldTransform for StringCase {
    fn name(&self) -> &str {
        match self {
            Self::Lower => "lowercase",
            Self::Upper => "uppercase",
            Self::Trim => "trim",
        }
    }

    fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(match self {
                Self::Lower => s.to_lowercase(),
                Self::Upper => s.to_uppercase(),
                Self::Trim => s.trim().to_string(),
            }),
            other => other,
        }
    }
}

/// Look up a bundled transform by the name used in schema files.
pub fn builtin(name: &str) -> Option<SharedTransform> {
    match name {
        "sha256" => Some(Arc::new(Sha256Digest)),
        "lowercase" => Some(Arc::new(StringCase::Lower)),
        "uppercase" => Some(Arc::new(StringCase::Upper)),
        "trim" => Some(Arc::new(StringCase::Trim)),
        _ => None,
    }
}
