//! Definition generation - inference followed by emission of every group.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::emit::{output_dir, Definition, EmitOutcome, Emitter};
use crate::error::GenerateError;
use crate::inference::infer_sample;
use crate::types::{GenerateOptions, InferenceResult};

/// Outcome of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Directory, relative to the output base, holding the definitions.
    pub output_dir: PathBuf,
    /// One entry per group, in ascending group name order.
    pub definitions: Vec<EmitOutcome>,
}

impl GenerateReport {
    pub fn written(&self) -> usize {
        self.definitions
            .iter()
            .filter(|o| matches!(o, EmitOutcome::Written(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.definitions.len() - self.written()
    }
}

/// Infer definitions from a sample and emit one per group.
///
/// Groups are emitted in ascending name order. Definitions that already
/// exist are left untouched.
///
/// # Errors
///
/// Returns `GenerateError` if the sample cannot be inferred from, or if the
/// emitter fails to persist a definition.
pub fn generate(
    sample: &Value,
    options: &GenerateOptions,
    emitter: &mut dyn Emitter,
) -> Result<GenerateReport, GenerateError> {
    let result = infer_sample(sample)?;
    emit_all(&result, options, emitter)
}

/// Emit one definition per group of an existing inference result.
pub fn emit_all(
    result: &InferenceResult,
    options: &GenerateOptions,
    emitter: &mut dyn Emitter,
) -> Result<GenerateReport, GenerateError> {
    debug!(
        entity = %options.entity,
        role = %options.role,
        groups = result.len(),
        "emitting definitions"
    );

    let definitions = result
        .groups()
        .map(|group| emitter.emit(&Definition::new(group, options)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GenerateReport {
        output_dir: output_dir(&options.entity, options.role),
        definitions,
    })
}
