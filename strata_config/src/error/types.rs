//! Primary error enum for configuration assembly flows.

use std::fmt;

use camino::Utf8PathBuf;
use serde_json::Value;
use thiserror::Error;

use crate::schema::FieldViolation;

/// Coarse classification of a document-tree value, used in merge diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    /// A key-to-value mapping.
    Mapping,
    /// An ordered sequence.
    Sequence,
    /// A textual scalar.
    String,
    /// A numeric scalar.
    Number,
    /// A boolean scalar.
    Boolean,
    /// The null scalar.
    Null,
}

impl ValueKind {
    /// Classify a document-tree value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Mapping,
            Value::Array(_) => Self::Sequence,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

/// Payload for an unresolved `${…}` property reference.
#[derive(Debug)]
pub struct UnresolvedProperty {
    /// Name of the property that could not be resolved.
    pub name: String,
    /// Keys known to the environment snapshot at resolution time.
    pub known_keys: Vec<String>,
    /// The raw text containing the offending reference.
    pub source_text: String,
}

/// Payload for a document that failed to parse after expansion.
#[derive(Debug)]
pub struct DocumentParse {
    /// Logical resource name the document was resolved under.
    pub logical_name: String,
    /// Identity of the concrete source (file path or repository label).
    pub source_identity: Utf8PathBuf,
    /// Parser failure for the expanded text.
    pub cause: Box<dyn std::error::Error + Send + Sync>,
}

/// Payload for a schema validation or coercion failure.
///
/// Carries everything needed to diagnose the failure without re-running
/// assembly: the effective (fragment-merged) schema, the pre-coercion merged
/// mapping, and one entry per violated field.
#[derive(Debug)]
pub struct InvalidConfiguration {
    /// The deep-merged schema the configuration was validated against.
    pub schema: Value,
    /// The merged configuration prior to any coercion.
    pub merged: Value,
    /// Every violated field, not just the first.
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {violation}")?;
        }
        Ok(())
    }
}

/// Errors that can occur while assembling configuration.
///
/// Every variant is fatal to the assembly call that raised it; there is no
/// partial-success mode. A missing resource is not an error and never
/// surfaces here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// A `${…}` reference named a property with no value and no default.
    #[error(
        "unresolved property '{}' (no value and no default) in \"{}\"",
        .0.name,
        .0.source_text
    )]
    UnresolvedProperty(Box<UnresolvedProperty>),

    /// A document failed to parse after expansion.
    #[error("failed to parse '{}' from {}: {}", .0.logical_name, .0.source_identity, .0.cause)]
    DocumentParse(Box<DocumentParse>),

    /// A named source could not be read.
    #[error("failed to read configuration source '{identity}': {source}")]
    Resource {
        /// Identity of the source that failed to read.
        identity: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A command-line token matched neither `--load <path>` nor `key=value`.
    #[error("invalid command-line override token '{token}': expected `--load <path>` or `key=value`")]
    InvalidArgument {
        /// The offending token.
        token: String,
    },

    /// A later layer tried to merge an incompatible shape into a collection.
    #[error("cannot merge {incoming} into {existing} at '{path}'")]
    MergeTypeMismatch {
        /// Slash-delimited path of the conflicting key.
        path: String,
        /// Kind of the value already present.
        existing: ValueKind,
        /// Kind of the value being merged in.
        incoming: ValueKind,
    },

    /// Schema validation or coercion rejected the merged configuration.
    #[error("configuration failed validation:\n{0}")]
    ConfigurationInvalid(Box<InvalidConfiguration>),
}
