use serde_json::Value;
use tracing::trace;

use crate::instance::Instance;
use crate::schema::Schema;

/// Write a plain value to an instance field.
///
/// A transform registered for the field wins over storing the value as is,
/// so a `password` field with a digest transform stores the digest.
pub fn assign(schema: &Schema, instance: &mut Instance, field: &str, value: Value) {
    let value = match schema.transform(instance.class(), field) {
        Some(transform) => {
            trace!(
                class = instance.class(),
                field,
                transform = transform.name(),
                "applying field transform"
            );
            transform.apply(value)
        }
        None => value,
    };
    instance.set_value(field, value);
}
