//! Definition emission - renders field groups and persists them.
//!
//! Emission is idempotent: a definition whose destination already exists is
//! skipped, never overwritten.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::EmitError;
use crate::naming::class_name;
use crate::render::render_definition;
use crate::types::{FieldGroup, GenerateOptions, Role};

/// Directory, relative to the output base, holding all generated definitions.
pub const SWAGGER_DIR: &str = "src/Infrastructure/Swagger";

/// One field group in its naming context, ready to render.
#[derive(Debug, Clone, Copy)]
pub struct Definition<'a> {
    pub group: &'a FieldGroup,
    pub entity: &'a str,
    pub prefix: &'a str,
    pub role: Role,
}

impl<'a> Definition<'a> {
    pub fn new(group: &'a FieldGroup, options: &'a GenerateOptions) -> Self {
        Self {
            group,
            entity: &options.entity,
            prefix: &options.prefix,
            role: options.role,
        }
    }

    pub fn is_root(&self) -> bool {
        self.group.is_root()
    }

    /// Class name of this definition.
    pub fn class_name(&self) -> String {
        class_name(
            self.prefix,
            self.entity,
            &self.group.name,
            self.is_root(),
            self.role,
        )
    }

    /// Class name of the nested definition generated for `group`.
    pub fn reference_class_name(&self, group: &str) -> String {
        class_name(self.prefix, self.entity, group, false, self.role)
    }

    /// Namespace of the generated class.
    pub fn namespace(&self) -> String {
        format!(
            "Infrastructure\\Swagger\\{}\\{}",
            self.entity,
            self.role.directory()
        )
    }

    /// Path of the generated file, relative to the output base.
    pub fn destination(&self) -> PathBuf {
        output_dir(self.entity, self.role).join(format!("{}.php", self.class_name()))
    }
}

/// Directory, relative to the output base, holding the definitions of one
/// entity and role.
pub fn output_dir(entity: &str, role: Role) -> PathBuf {
    Path::new(SWAGGER_DIR).join(entity).join(role.directory())
}

/// Result of emitting one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "lowercase")]
pub enum EmitOutcome {
    Written(PathBuf),
    /// A definition already existed at the destination.
    Skipped(PathBuf),
}

impl EmitOutcome {
    pub fn path(&self) -> &Path {
        match self {
            EmitOutcome::Written(path) | EmitOutcome::Skipped(path) => path,
        }
    }
}

/// Persists rendered definitions.
pub trait Emitter {
    /// Whether a definition already exists at `destination`.
    fn exists(&self, destination: &Path) -> bool;

    /// Store `contents` at `destination`.
    fn write(&mut self, destination: &Path, contents: &str) -> Result<(), EmitError>;

    /// Render and store a definition unless its destination already exists.
    fn emit(&mut self, definition: &Definition<'_>) -> Result<EmitOutcome, EmitError> {
        let destination = definition.destination();
        if self.exists(&destination) {
            debug!(path = %destination.display(), "definition exists, skipping");
            return Ok(EmitOutcome::Skipped(destination));
        }

        let contents = render_definition(definition);
        self.write(&destination, &contents)?;
        info!(path = %destination.display(), "definition written");
        Ok(EmitOutcome::Written(destination))
    }
}

/// Writes definitions below a base directory, creating directories as needed.
#[derive(Debug, Clone)]
pub struct FsEmitter {
    base: PathBuf,
}

impl FsEmitter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Emitter for FsEmitter {
    fn exists(&self, destination: &Path) -> bool {
        self.base.join(destination).exists()
    }

    fn write(&mut self, destination: &Path, contents: &str) -> Result<(), EmitError> {
        let path = self.base.join(destination);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| EmitError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, contents).map_err(|source| EmitError::Write { path, source })
    }
}

/// Keeps definitions in memory, keyed by destination.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    files: BTreeMap<PathBuf, String>,
    order: Vec<PathBuf>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents stored at `destination`.
    pub fn get(&self, destination: impl AsRef<Path>) -> Option<&str> {
        self.files.get(destination.as_ref()).map(String::as_str)
    }

    /// Destinations in the order they were written.
    pub fn destinations(&self) -> &[PathBuf] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Emitter for MemoryEmitter {
    fn exists(&self, destination: &Path) -> bool {
        self.files.contains_key(destination)
    }

    fn write(&mut self, destination: &Path, contents: &str) -> Result<(), EmitError> {
        if self
            .files
            .insert(destination.to_path_buf(), contents.to_string())
            .is_none()
        {
            self.order.push(destination.to_path_buf());
        }
        Ok(())
    }
}
