//! Edit script loading and replay.
//!
//! An edit script is a YAML or JSON sequence of the three engine operations,
//! replayed in order against a fresh document. Scripts are the CLI's way of
//! driving the engine without a UI; each entry corresponds to exactly one
//! form-control event the wizard shell would have routed.
//!
//! ```yaml
//! - set:
//!     path: overview.title
//!     value: Adjuvant Therapy Outcomes Study
//! - append:
//!     path: arms
//! - set:
//!     path: arms[1].name
//!     value: Placebo
//! - remove_at:
//!     path: eligibility.exclusion_criteria
//!     index: 0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::document::node::{FieldNumber, ScalarValue};
use crate::engine::FormEngine;
use crate::fieldpath::FieldPath;
use crate::schema::ScalarKind;

/// One scripted engine operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOp {
    /// Write a scalar value at a path.
    Set {
        path: String,
        value: serde_json::Value,
    },
    /// Append a default element to a collection.
    Append { path: String },
    /// Remove the element at an index from a collection.
    RemoveAt { path: String, index: usize },
}

/// Loads an edit script from a file.
///
/// The format is chosen by extension: `.yaml`/`.yml` parse as YAML, anything
/// else as JSON.
pub fn load_script_file<P: AsRef<Path>>(path: P) -> Result<Vec<EditOp>> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read script file {}", path_ref.display()))?;

    let is_yaml = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content).context("Failed to parse YAML edit script")
    } else {
        serde_json::from_str(&content).context("Failed to parse JSON edit script")
    }
}

/// Replays a script against the engine, stopping at the first failure.
///
/// Values are coerced to the scalar kind the schema declares for the target
/// path, so a script can say `value: 120` for a number field and
/// `value: Phase 2` for a choice field.
pub fn apply_script(engine: &mut FormEngine, ops: &[EditOp]) -> Result<()> {
    for (step, op) in ops.iter().enumerate() {
        apply_op(engine, op).with_context(|| format!("Script step {} failed", step + 1))?;
    }
    Ok(())
}

fn apply_op(engine: &mut FormEngine, op: &EditOp) -> Result<()> {
    match op {
        EditOp::Set { path, value } => {
            let path: FieldPath = path.parse()?;
            let kind = engine
                .schema()
                .lookup(&path)
                .and_then(|s| s.kind())
                .cloned()
                .with_context(|| format!("'{}' is not a scalar field in the schema", path))?;
            let value = scalar_from_json(&kind, value)
                .with_context(|| format!("Bad value for '{}'", path))?;
            engine.set(&path, value)?;
        }
        EditOp::Append { path } => {
            let path: FieldPath = path.parse()?;
            engine.append(&path)?;
        }
        EditOp::RemoveAt { path, index } => {
            let path: FieldPath = path.parse()?;
            engine.remove_at(&path, *index)?;
        }
    }
    Ok(())
}

/// Coerces a JSON value to the scalar kind the schema declares.
fn scalar_from_json(kind: &ScalarKind, value: &serde_json::Value) -> Result<ScalarValue> {
    match kind {
        ScalarKind::Text => match value.as_str() {
            Some(s) => Ok(ScalarValue::Text(s.to_string())),
            None => bail!("Expected a string, got {}", value),
        },
        ScalarKind::Date => match value.as_str() {
            Some(s) => Ok(ScalarValue::Date(s.to_string())),
            None => bail!("Expected a date string, got {}", value),
        },
        ScalarKind::Choice(options) => match value.as_str() {
            Some(s) if options.iter().any(|o| o == s) => Ok(ScalarValue::Choice(s.to_string())),
            Some(s) => bail!(
                "'{}' is not one of the declared options: {}",
                s,
                options.join(", ")
            ),
            None => bail!("Expected a choice string, got {}", value),
        },
        ScalarKind::Number => {
            if let Some(i) = value.as_i64() {
                Ok(ScalarValue::Number(FieldNumber::Integer(i)))
            } else if let Some(f) = value.as_f64() {
                Ok(ScalarValue::Number(FieldNumber::Float(f)))
            } else {
                bail!("Expected a number, got {}", value)
            }
        }
        ScalarKind::Flag => match value.as_bool() {
            Some(b) => Ok(ScalarValue::Flag(b)),
            None => bail!("Expected true or false, got {}", value),
        },
    }
}
