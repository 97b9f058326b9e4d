//! Schema validation and coercion orchestration.
//!
//! The assembler does not implement a schema language. It deep-merges the
//! component-declared schema fragments into one effective descriptor and
//! hands both the descriptor and the merged configuration to an injected
//! [`CoercionStrategy`]. The strategy either fully coerces and validates the
//! mapping or reports every violation; coercion is never partially applied.

use std::fmt;

use serde_json::Value;

use crate::error::{StrataError, StrataResult};
use crate::merge::merge_documents;

/// One violated field reported by a coercion strategy.
#[derive(Clone, Debug)]
pub struct FieldViolation {
    /// Slash-delimited path of the violated field.
    pub path: String,
    /// Description of the expected type or constraint.
    pub expected: String,
    /// The offending value, or `None` when the field was absent.
    pub found: Option<Value>,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': expected {}", self.path, self.expected)?;
        match &self.found {
            Some(value) => write!(f, ", found {value}"),
            None => write!(f, ", but the field was absent"),
        }
    }
}

/// Externally supplied coercion and validation capability.
///
/// Implementations apply string-coercion rules (numeric strings to numbers,
/// recognised tokens to their typed values) followed by structural
/// validation, and report **all** violations rather than the first.
pub trait CoercionStrategy {
    /// Coerce and validate `merged` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns every violated field when validation fails; the merged
    /// mapping must be left untouched by a failed call.
    fn coerce(&self, merged: &Value, schema: &Value) -> Result<Value, Vec<FieldViolation>>;
}

/// Validate a merged configuration against deep-merged schema fragments.
///
/// The effective schema is the left-fold deep-merge of `fragments`, so
/// components contribute their slice of the descriptor independently.
///
/// # Errors
///
/// Returns [`StrataError::ConfigurationInvalid`] carrying the effective
/// schema, the pre-coercion mapping, and every violation; or a merge error
/// when the fragments themselves conflict structurally.
pub fn validate(
    merged: Value,
    fragments: Vec<Value>,
    strategy: &dyn CoercionStrategy,
) -> StrataResult<Value> {
    let schema = merge_documents(fragments)?;
    match strategy.coerce(&merged, &schema) {
        Ok(coerced) => Ok(coerced),
        Err(violations) => {
            Err(StrataError::configuration_invalid(schema, merged, violations).into_shared())
        }
    }
}
