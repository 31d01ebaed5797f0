//! Schema inference - partitions a sample object into flat field groups.
//!
//! Nested objects are promoted into groups of their own, deepest first. Each
//! promoted object is replaced in the working copy by a placeholder string
//! (its leaf key), so that the enclosing group sees a reference instead of
//! expanding the object again.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::GenerateError;
use crate::field::{reference_field, resolve_field};
use crate::flatten::{depth, flatten, lookup, replace, split_leaf};
use crate::types::{json_type_name, FieldGroup, InferenceResult, ROOT_GROUP};

/// Infer field groups from a sample value.
///
/// A top-level list is sampled by its first element only. The sample must be
/// an object once sampled. The caller's value is left untouched: inference
/// runs on a private copy.
///
/// # Errors
///
/// Returns `GenerateError::EmptySample` for an empty top-level list, or
/// `GenerateError::UnsupportedSample` if the sample is not an object.
pub fn infer_sample(sample: &Value) -> Result<InferenceResult, GenerateError> {
    let sampled = match sample {
        Value::Array(items) => items.first().ok_or(GenerateError::EmptySample)?,
        other => other,
    };

    let Value::Object(map) = sampled else {
        return Err(GenerateError::UnsupportedSample {
            actual: json_type_name(sampled).to_string(),
        });
    };

    let working = map.clone();
    let paths = flatten(&working);
    Ok(infer(&paths, working))
}

/// Infer field groups from the flattened paths of `data`.
///
/// `data` is the working copy and is rewritten as nested objects get
/// promoted. Groups are keyed by the leaf segment of the path they were
/// found at; when two objects share a leaf segment the one processed later
/// (shallower, or later in path order) wins. An object under a key that
/// itself contains a dot is grouped under that whole key.
pub fn infer(paths: &[String], mut data: Map<String, Value>) -> InferenceResult {
    let max_depth = paths.iter().map(|p| depth(p)).max().unwrap_or(0);
    let mut promoted: BTreeMap<String, Map<String, Value>> = BTreeMap::new();

    for level in (0..=max_depth).rev() {
        let at_level: Vec<&str> = paths
            .iter()
            .map(String::as_str)
            .filter(|p| depth(p) == level)
            .collect();

        // Objects still in place at this depth have no child path that could
        // promote them: they are empty or every key holds a dot.
        for path in &at_level {
            if matches!(lookup(&data, path), Some(Value::Object(_))) {
                let (_, leaf) = split_leaf(path);
                promote(&mut promoted, &mut data, path, leaf);
            }
        }

        for path in &at_level {
            // A sibling may already have promoted the parent.
            if lookup(&data, path).is_none() {
                continue;
            }
            let (Some(parent), _) = split_leaf(path) else {
                continue;
            };
            if !matches!(lookup(&data, parent), Some(Value::Object(_))) {
                continue;
            }
            let (_, name) = split_leaf(parent);
            promote(&mut promoted, &mut data, parent, name);
        }
    }

    promote_unaddressable(&mut promoted, &mut data);

    let mut groups: BTreeMap<String, FieldGroup> = promoted
        .iter()
        .map(|(name, object)| (name.clone(), build_group(name, object, &promoted)))
        .collect();

    if groups.contains_key(ROOT_GROUP) {
        warn!(
            group = ROOT_GROUP,
            "nested group shadowed by the top-level group, its reference will not resolve"
        );
    }
    groups.insert(
        ROOT_GROUP.to_string(),
        build_group(ROOT_GROUP, &data, &promoted),
    );

    debug!(groups = groups.len(), max_depth, "inference complete");
    InferenceResult::new(groups)
}

/// Move the object at `path` into the promoted set under `name`, leaving
/// `name` behind as its placeholder.
fn promote(
    promoted: &mut BTreeMap<String, Map<String, Value>>,
    data: &mut Map<String, Value>,
    path: &str,
    name: &str,
) {
    if let Some(Value::Object(object)) = replace(data, path, Value::String(name.to_string())) {
        store(promoted, name, path, object);
    }
}

fn store(
    promoted: &mut BTreeMap<String, Map<String, Value>>,
    name: &str,
    path: &str,
    mut object: Map<String, Value>,
) {
    debug!(group = name, path, fields = object.len(), "promoting nested object");
    promote_unaddressable(promoted, &mut object);
    if promoted.insert(name.to_string(), object).is_some() {
        debug!(group = name, path, "group name collision, keeping the later object");
    }
}

/// Promote the objects left under keys that contain a dot.
///
/// Dotted paths cannot reach them, so they are still in place once every
/// addressable descendant has been promoted. Each is named by its own key.
fn promote_unaddressable(
    promoted: &mut BTreeMap<String, Map<String, Value>>,
    object: &mut Map<String, Value>,
) {
    for (key, value) in object.iter_mut() {
        if !value.is_object() {
            continue;
        }
        if let Value::Object(inner) = std::mem::replace(value, Value::String(key.clone())) {
            store(promoted, key, key, inner);
        }
    }
}

fn build_group(
    name: &str,
    object: &Map<String, Value>,
    promoted: &BTreeMap<String, Map<String, Value>>,
) -> FieldGroup {
    let mut group = FieldGroup::new(name);
    group.fields = object
        .iter()
        .map(|(key, value)| {
            if is_placeholder(key, value) && promoted.contains_key(key) {
                reference_field(key, key)
            } else {
                resolve_field(key, value)
            }
        })
        .collect();
    group
}

/// A value equal to its own key marks a promoted object.
fn is_placeholder(key: &str, value: &Value) -> bool {
    value.as_str() == Some(key)
}
