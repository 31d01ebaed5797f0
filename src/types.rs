//! Core types for schema inference.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerateError;

/// Name of the group inferred from the top-level object.
pub const ROOT_GROUP: &str = "root";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Role of the sample payload.
///
/// Determines the class postfix and the output directory of emitted definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Request,
    Response,
}

impl Role {
    /// Class name postfix for definitions of this role.
    pub fn postfix(&self) -> &'static str {
        match self {
            Role::Request => "ApiRequest",
            Role::Response => "ApiResponse",
        }
    }

    /// Directory (and namespace segment) holding definitions of this role.
    pub fn directory(&self) -> &'static str {
        match self {
            Role::Request => "Request",
            Role::Response => "Response",
        }
    }

    /// Property visibility used in rendered classes.
    pub fn property_visibility(&self) -> &'static str {
        match self {
            Role::Request => "private",
            Role::Response => "public",
        }
    }
}

impl FromStr for Role {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(Role::Request),
            "response" => Ok(Role::Response),
            other => Err(GenerateError::InvalidRole {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Request => f.write_str("request"),
            Role::Response => f.write_str("response"),
        }
    }
}

/// Semantic type of an inferred field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Int,
    Float,
    Bool,
    String,
    StringArray,
    IntArray,
    MixedArray,
    Reference,
}

impl FieldKind {
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            FieldKind::StringArray | FieldKind::IntArray | FieldKind::MixedArray
        )
    }
}

/// One inferred field.
///
/// `example` is set for scalar kinds, `reference` only for
/// [`FieldKind::Reference`]. Array kinds carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Leaf key, never a dotted path.
    pub name: String,
    pub kind: FieldKind,
    /// Rendered literal text, e.g. `48`, `"0.1"` or `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Name of the group this field points to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A named, ordered set of fields forming one flat definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldGroup {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FieldGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_GROUP
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in order, as listed in the `required` block.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Groups produced by one inference run, keyed and ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InferenceResult {
    groups: BTreeMap<String, FieldGroup>,
}

impl InferenceResult {
    pub(crate) fn new(groups: BTreeMap<String, FieldGroup>) -> Self {
        Self { groups }
    }

    /// The group inferred from the top-level object.
    ///
    /// Always present: the engine inserts it last.
    pub fn root(&self) -> Option<&FieldGroup> {
        self.groups.get(ROOT_GROUP)
    }

    pub fn get(&self, name: &str) -> Option<&FieldGroup> {
        self.groups.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Groups in ascending name order.
    pub fn groups(&self) -> impl Iterator<Item = &FieldGroup> {
        self.groups.values()
    }
}

/// Options for definition generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Entity name, used for the root class and the output directory.
    pub entity: String,
    /// Class name prefix, normalized to title case.
    pub prefix: String,
    pub role: Role,
}

impl GenerateOptions {
    /// Create generation options.
    ///
    /// The prefix is lowercased, then each word is capitalized
    /// (`"GET"` becomes `"Get"`).
    pub fn new(entity: impl Into<String>, prefix: &str, role: Role) -> Self {
        Self {
            entity: entity.into(),
            prefix: crate::naming::title_case(&prefix.to_lowercase()),
            role,
        }
    }
}
