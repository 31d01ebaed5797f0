//! Field type resolution.
//!
//! Maps one sample value to a [`FieldDescriptor`]: scalar kind with an
//! example literal, typed array, or reference to another group.

use serde_json::Value;

use crate::types::{FieldDescriptor, FieldKind};

/// Example literal emitted for every boolean field, whatever the sample holds.
pub const BOOL_EXAMPLE: &str = "false";

/// Resolve the kind and example literal of a field from its sample value.
///
/// Scalars: integers are `int`, other numbers `float` (example quoted as
/// text), booleans `bool`, anything else (null included) `string`.
/// Lists are typed by their first element; an object that reaches this
/// point is typed the same way over its values.
pub fn resolve_field(key: &str, value: &Value) -> FieldDescriptor {
    match value {
        Value::Array(items) => array_field(key, items.first()),
        Value::Object(map) => array_field(key, map.values().next()),
        scalar => scalar_field(key, scalar),
    }
}

/// A field pointing to the group named `group`.
pub fn reference_field(key: &str, group: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: key.to_string(),
        kind: FieldKind::Reference,
        example: None,
        reference: Some(group.to_string()),
    }
}

fn scalar_field(key: &str, value: &Value) -> FieldDescriptor {
    let (kind, example) = match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => (FieldKind::Int, n.to_string()),
        Value::Number(n) => (FieldKind::Float, quote(&float_text(&n.to_string()))),
        Value::Bool(_) => (FieldKind::Bool, BOOL_EXAMPLE.to_string()),
        Value::String(s) => (FieldKind::String, quote(s)),
        _ => (FieldKind::String, quote("")),
    };

    FieldDescriptor {
        name: key.to_string(),
        kind,
        example: Some(example),
        reference: None,
    }
}

fn array_field(key: &str, first: Option<&Value>) -> FieldDescriptor {
    let kind = match first {
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => FieldKind::IntArray,
        Some(Value::String(_)) => FieldKind::StringArray,
        _ => FieldKind::MixedArray,
    };

    FieldDescriptor {
        name: key.to_string(),
        kind,
        example: None,
        reference: None,
    }
}

/// Whole floats print without their `.0`, so `48.0` reads `48`.
fn float_text(text: &str) -> String {
    text.strip_suffix(".0").unwrap_or(text).to_string()
}

/// Quote text as an annotation string literal, doubling embedded quotes.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
