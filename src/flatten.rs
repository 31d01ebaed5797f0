//! Dotted key paths over nested JSON objects.
//!
//! `flatten` lists every path reachable through nested objects, ancestors
//! before their children. The remaining helpers address a value by such a
//! path, splitting it on `.`.

use serde_json::{Map, Value};

/// Flatten a mapping into the ordered list of its dotted key paths.
///
/// Every key is emitted, then, if its value is an object, each of that
/// object's paths prefixed with `key.`. Lists are emitted as the bare key
/// and never walked.
///
/// ```
/// use serde_json::json;
///
/// let sample = json!({"user": {"first_name": "John", "last_name": "Doe"}});
/// let paths = swgen::flatten(sample.as_object().unwrap());
/// assert_eq!(paths, ["user", "user.first_name", "user.last_name"]);
/// ```
pub fn flatten(map: &Map<String, Value>) -> Vec<String> {
    let mut paths = Vec::new();

    for (key, value) in map {
        paths.push(key.clone());

        if let Value::Object(nested) = value {
            for nested_path in flatten(nested) {
                paths.push(format!("{}.{}", key, nested_path));
            }
        }
    }

    paths
}

/// Nesting depth of a path: its number of dots.
pub fn depth(path: &str) -> usize {
    path.matches('.').count()
}

/// Split a path into its parent path and leaf segment.
///
/// Returns `None` for the parent of a top-level path.
pub fn split_leaf(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, path),
    }
}

/// Look up the value at a dotted path.
pub fn lookup<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Replace the value at a dotted path, returning the value it held.
///
/// Returns `None`, leaving `map` untouched, if the path does not resolve.
pub fn replace(map: &mut Map<String, Value>, path: &str, value: Value) -> Option<Value> {
    let (parent, leaf) = split_leaf(path);

    let container = match parent {
        None => map,
        Some(parent) => lookup_mut(map, parent)?.as_object_mut()?,
    };

    container
        .get_mut(leaf)
        .map(|slot| std::mem::replace(slot, value))
}

fn lookup_mut<'a>(map: &'a mut Map<String, Value>, path: &str) -> Option<&'a mut Value> {
    let mut segments = path.split('.');
    let mut current = map.get_mut(segments.next()?)?;
    for segment in segments {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}
