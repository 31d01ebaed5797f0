//! swgen
//!
//! Infers OpenAPI annotation schemas from a sample JSON payload.
//!
//! A sample object is flattened into dotted key paths, then partitioned into
//! flat field groups: one `root` group for the top-level object and one group
//! per nested object, named after the key it was found under. Nested objects
//! are replaced in their parent by a reference field.
//!
//! # Example
//!
//! ```
//! use swgen::{infer_sample, FieldKind};
//! use serde_json::json;
//!
//! let sample = json!({
//!     "id": 48,
//!     "order": {
//!         "customer": { "city": "X" }
//!     }
//! });
//!
//! let result = infer_sample(&sample).unwrap();
//! assert_eq!(result.names().collect::<Vec<_>>(), ["customer", "order", "root"]);
//!
//! let root = result.root().unwrap();
//! assert_eq!(root.field("id").unwrap().kind, FieldKind::Int);
//! assert_eq!(root.field("order").unwrap().kind, FieldKind::Reference);
//! ```
//!
//! # Field Kinds
//!
//! | Sample value | Kind | Example literal |
//! |--------------|------|-----------------|
//! | integer | `int` | `48` |
//! | other number | `float` | `"0.1"` |
//! | boolean | `bool` | always `false` |
//! | string, null | `string` | `"text"` |
//! | list, first item integer | `intArray` | none |
//! | list, first item string | `stringArray` | none |
//! | any other list | `mixedArray` | none |
//! | nested object | `reference` | none |
//!
//! Lists are sampled by their first element; objects inside lists are never
//! promoted to groups of their own.

mod emit;
mod error;
mod field;
mod flatten;
mod generator;
mod inference;
mod loader;
mod naming;
mod operation;
mod render;
mod types;

pub use emit::{
    output_dir, Definition, EmitOutcome, Emitter, FsEmitter, MemoryEmitter, SWAGGER_DIR,
};
pub use error::{EmitError, GenerateError};
pub use field::{reference_field, resolve_field, BOOL_EXAMPLE};
pub use flatten::{depth, flatten, lookup, replace, split_leaf};
pub use generator::{emit_all, generate, GenerateReport};
pub use inference::{infer, infer_sample};
pub use loader::{is_url, load_sample, load_sample_auto, load_sample_str};
pub use naming::{class_name, path_suffix, title_case};
pub use operation::{path_parameters, render_operation, status_text, OperationOptions};
pub use render::render_definition;
pub use types::{
    json_type_name, FieldDescriptor, FieldGroup, FieldKind, GenerateOptions, InferenceResult,
    Role, ROOT_GROUP,
};

#[cfg(feature = "remote")]
pub use loader::load_sample_url;
